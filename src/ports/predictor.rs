//! Predictor port: Trait for the pre-trained binary classifier.
//!
//! This trait abstracts the model artifact from the application logic.
//! The application never retrains or inspects the model; it only hands it
//! an encoded feature vector and reads back a label.

use crate::domain::{FeatureVector, Label};

/// Errors that can occur while evaluating a model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictorError {
    #[error("Model expects {expected} features, got {got}")]
    WidthMismatch { expected: usize, got: usize },

    #[error("Model evaluation failed: {0}")]
    Evaluation(String),
}

/// Trait for binary classifiers.
///
/// Implementations are loaded once per process and are immutable afterwards.
pub trait Predictor: Send + Sync {
    /// Classify one encoded row.
    ///
    /// # Errors
    /// Returns `PredictorError::WidthMismatch` if the vector does not have
    /// the number of features the model was trained on.
    fn predict(&self, features: &FeatureVector) -> Result<Label, PredictorError>;

    /// Positive-class probability, if the model exposes one.
    ///
    /// # Errors
    /// Same as [`Predictor::predict`].
    fn probability(&self, _features: &FeatureVector) -> Result<Option<f64>, PredictorError> {
        Ok(None)
    }

    /// Feature names the artifact declares it was trained on, in order.
    fn declared_features(&self) -> Option<&[String]> {
        None
    }

    /// Schema id (`name@version`) the artifact declares.
    fn declared_schema(&self) -> Option<&str> {
        None
    }
}
