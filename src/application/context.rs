//! Application context: everything a session needs, built once at startup.

use std::sync::Arc;

use crate::adapters::{CsvDataset, TreeEnsemble};
use crate::config::AppConfig;
use crate::domain::{BoundsTable, FeatureSchema};
use crate::ports::Predictor;
use crate::{Artifact, GlucoscopeError};

use super::bounds::load_patient_bounds;
use super::prediction::PredictionService;

/// Immutable startup state handed to the presentation layer.
pub struct AppContext<P>
where
    P: Predictor + ?Sized,
{
    config: AppConfig,
    bounds: BoundsTable,
    service: PredictionService<P>,
}

impl<P> AppContext<P>
where
    P: Predictor + ?Sized,
{
    /// Assemble a context, checking the predictor against the schema.
    ///
    /// # Errors
    /// Returns `FeatureOrderMismatch` if the predictor declares feature
    /// names that differ in order or number from the schema's columns, and
    /// `SchemaMismatch` if it declares a different schema id.
    pub fn new(
        config: AppConfig,
        schema: FeatureSchema,
        predictor: Arc<P>,
        bounds: BoundsTable,
    ) -> Result<Self, GlucoscopeError> {
        let expected = schema.column_names();

        if let Some(declared) = predictor.declared_features() {
            let same = declared.len() == expected.len()
                && declared.iter().zip(&expected).all(|(d, e)| d == e);
            if !same {
                return Err(GlucoscopeError::FeatureOrderMismatch {
                    expected: expected.iter().map(|s| (*s).to_string()).collect(),
                    found: declared.to_vec(),
                });
            }
        }

        if let Some(declared) = predictor.declared_schema() {
            let active = schema.id().to_string();
            if declared != active {
                return Err(GlucoscopeError::SchemaMismatch {
                    active,
                    declared: declared.to_string(),
                });
            }
        }

        tracing::info!(
            "Context ready: schema={}, {} columns, {} bounded features",
            schema.id(),
            schema.width(),
            bounds.len()
        );

        Ok(Self {
            config,
            bounds,
            service: PredictionService::new(schema, predictor),
        })
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn schema(&self) -> &FeatureSchema {
        self.service.schema()
    }

    #[must_use]
    pub fn bounds(&self) -> &BoundsTable {
        &self.bounds
    }

    #[must_use]
    pub fn service(&self) -> &PredictionService<P> {
        &self.service
    }
}

impl AppContext<TreeEnsemble> {
    /// Load the dataset bounds and the model named by `config`.
    ///
    /// # Errors
    /// Returns `ArtifactLoad` naming the file that is missing or corrupt,
    /// or a mismatch error if the model does not fit the configured schema.
    pub fn load(config: AppConfig) -> Result<Self, GlucoscopeError> {
        let schema = config.schema.schema()?;

        let bounds = CsvDataset::open(&config.dataset_path)
            .map_err(|e| e.to_string())
            .and_then(|dataset| load_patient_bounds(&dataset).map_err(|e| e.to_string()))
            .map_err(|reason| GlucoscopeError::ArtifactLoad {
                artifact: Artifact::Dataset,
                path: config.dataset_path.clone(),
                reason,
            })?;

        let model = TreeEnsemble::load(&config.model_path, config.require_model_digest).map_err(
            |e| GlucoscopeError::ArtifactLoad {
                artifact: Artifact::Model,
                path: config.model_path.clone(),
                reason: e.to_string(),
            },
        )?;
        tracing::debug!("Model sha256 {}", model.digest());

        Self::new(config, schema, Arc::new(model), bounds)
    }
}
