//! Prediction service: encode a patient record, then classify it.

use std::sync::Arc;

use crate::domain::{Assessment, FeatureSchema, PatientRecord};
use crate::ports::Predictor;
use crate::GlucoscopeError;

/// Service running one synchronous encode-then-predict per request.
pub struct PredictionService<P>
where
    P: Predictor + ?Sized,
{
    schema: FeatureSchema,
    predictor: Arc<P>,
}

impl<P> PredictionService<P>
where
    P: Predictor + ?Sized,
{
    /// Create a new prediction service.
    pub fn new(schema: FeatureSchema, predictor: Arc<P>) -> Self {
        Self { schema, predictor }
    }

    #[must_use]
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    #[must_use]
    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    /// Assess a patient record.
    ///
    /// The record is encoded first; an unknown category returns before the
    /// predictor is consulted.
    ///
    /// # Errors
    /// Returns `GlucoscopeError::Encode` for an unknown category and
    /// `GlucoscopeError::Predictor` if the model cannot evaluate the vector.
    pub fn assess(&self, record: &PatientRecord) -> Result<Assessment, GlucoscopeError> {
        let vector = self.schema.encode(record)?;
        tracing::debug!("Encoded {} features under {}", vector.len(), vector.schema());

        let label = self.predictor.predict(&vector)?;
        let probability = self.predictor.probability(&vector)?;

        tracing::info!("Prediction complete: label={}, schema={}", label, self.schema.id());

        Ok(Assessment::new(label, probability, self.schema.id()))
    }
}
