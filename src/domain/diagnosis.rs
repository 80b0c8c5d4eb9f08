//! Prediction result types.
//!
//! Represents the output of the binary diabetes classifier.

use serde::{Deserialize, Serialize};

use super::schema::SchemaId;

/// Binary class emitted by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    /// Class 0: no diabetes
    Negative,
    /// Class 1: diabetes
    Positive,
}

impl Label {
    /// Get a human-readable result message.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Negative => "No Diabetes Detected",
            Self::Positive => "Diabetes Found",
        }
    }

    /// Get the associated color for TUI display (RGB).
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Negative => (16, 185, 129), // Emerald (#10B981)
            Self::Positive => (251, 191, 36), // Amber (#FBBF24)
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negative => write!(f, "NEGATIVE"),
            Self::Positive => write!(f, "POSITIVE"),
        }
    }
}

/// Outcome of one encode-then-predict request.
///
/// Shown once and then dropped; nothing here is persisted.
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    /// Predicted class
    pub label: Label,

    /// Positive-class probability, when the predictor exposes one
    pub probability: Option<f64>,

    /// Schema the input was encoded with
    pub schema: SchemaId,

    /// When the prediction was made
    pub assessed_at: chrono::DateTime<chrono::Utc>,
}

impl Assessment {
    #[must_use]
    pub fn new(label: Label, probability: Option<f64>, schema: SchemaId) -> Self {
        Self {
            label,
            probability,
            schema,
            assessed_at: chrono::Utc::now(),
        }
    }

    /// Whether the classifier flagged diabetes.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.label == Label::Positive
    }
}
