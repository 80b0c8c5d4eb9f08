//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the core use cases of the application.

mod bounds;
mod context;
mod prediction;

pub use bounds::{load_bounds, load_patient_bounds};
pub use context::AppContext;
pub use prediction::PredictionService;
