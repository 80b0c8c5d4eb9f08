//! Ports layer: Trait definitions for external collaborators.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and the outside world (model artifact, dataset).

mod dataset;
mod predictor;

pub use dataset::TabularSource;
pub use predictor::{Predictor, PredictorError};
