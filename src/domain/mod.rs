//! Domain layer: Core business types and logic.
//!
//! This module contains pure Rust types with no I/O.
//! Patient records, the declared feature schemas and their encoder,
//! feature bounds and prediction results live here.

mod bounds;
mod diagnosis;
mod patient;
pub mod schema;

pub use bounds::{Bounds, BoundsError, BoundsTable};
pub use diagnosis::{Assessment, Label};
pub use patient::{Field, FieldKind, NumericKind, PatientRecord};
pub use schema::{
    ColumnSpec, EncodeError, EncodingRule, FeatureSchema, FeatureValue, FeatureVector, SchemaError,
    SchemaId, SchemaVariant,
};
