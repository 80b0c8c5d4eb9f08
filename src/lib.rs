//! # Glucoscope
//!
//! Terminal diabetes risk screening over a declared feature schema.
//!
//! This crate provides:
//! - An explicit, versioned feature schema and the encoder that follows it
//! - Input bounds derived from a reference dataset
//! - A tree ensemble predictor loaded from a JSON export
//! - Terminal UI for entering patient metrics and showing the prediction
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (PatientRecord, FeatureSchema, Bounds, Label)
//! - `ports`: Trait definitions for external collaborators
//! - `adapters`: Concrete implementations (CSV dataset, tree ensemble)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

use std::path::PathBuf;

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use config::AppConfig;
pub use domain::{Assessment, FeatureSchema, FeatureVector, Label, PatientRecord, SchemaVariant};

/// Result type for Glucoscope operations
pub type Result<T> = std::result::Result<T, GlucoscopeError>;

/// Startup artifacts the application cannot run without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    Model,
    Dataset,
}

impl std::fmt::Display for Artifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Model => write!(f, "model"),
            Self::Dataset => write!(f, "dataset"),
        }
    }
}

/// Main error type for Glucoscope
#[derive(Debug, thiserror::Error)]
pub enum GlucoscopeError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Failed to load {artifact} from {path:?}: {reason}")]
    ArtifactLoad {
        artifact: Artifact,
        path: PathBuf,
        reason: String,
    },

    #[error(transparent)]
    Encode(#[from] domain::EncodeError),

    #[error(
        "Feature order mismatch: schema expects [{}], model declares [{}]",
        .expected.join(", "),
        .found.join(", ")
    )]
    FeatureOrderMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Schema mismatch: active schema is {active}, model was trained on {declared}")]
    SchemaMismatch { active: String, declared: String },

    #[error("Invalid schema: {0}")]
    Schema(#[from] domain::SchemaError),

    #[error("Bounds error: {0}")]
    Bounds(#[from] domain::BoundsError),

    #[error("Prediction failed: {0}")]
    Predictor(#[from] ports::PredictorError),
}
