//! Tree ensemble adapter: Implementation of Predictor.
//!
//! Evaluates a gradient-boosted tree ensemble exported to JSON by the
//! training pipeline.
//!
//! # Export format
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "schema": "diabetes-ordinal@1",
//!   "feature_names": ["gender", "age", ...],
//!   "base_score": -2.1,
//!   "threshold": 0.5,
//!   "trees": [
//!     { "nodes": [
//!         { "feature": 6, "threshold": 6.7, "left": 1, "right": 2 },
//!         { "leaf": -0.4 },
//!         { "leaf": 1.3 }
//!     ] }
//!   ]
//! }
//! ```
//!
//! A row goes left when `x[feature] < threshold`. The margin is
//! `base_score` plus one leaf per tree; the probability is its logistic.
//! A row is positive only when the probability exceeds `threshold`, so a
//! margin of exactly zero is negative at the default 0.5.
//!
//! # Integrity
//!
//! If a `<model>.sha256` file sits next to the model, its digest must match
//! the model bytes. Deployments can require the pin (see
//! `GLUCOSCOPE_REQUIRE_MODEL_DIGEST`); the `pin_model` binary writes it.

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{FeatureVector, Label};
use crate::ports::{Predictor, PredictorError};

/// Export format version understood by this adapter.
pub const SUPPORTED_FORMAT_VERSION: u32 = 1;

fn default_threshold() -> f64 {
    0.5
}

/// Model parameters exported by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedEnsemble {
    pub format_version: u32,
    #[serde(default)]
    pub schema: Option<String>,
    pub feature_names: Vec<String>,
    #[serde(default)]
    pub base_score: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    pub trees: Vec<ExportedTree>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedTree {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        leaf: f64,
    },
}

/// Error type for model loading.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Cannot read model {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Model is not a valid ensemble export: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid model: {0}")]
    Invalid(String),

    #[error("Model digest mismatch (pinned {expected}, actual {actual})")]
    DigestMismatch { expected: String, actual: String },

    #[error("Model digest required but {0:?} not found")]
    DigestMissing(PathBuf),
}

/// Path of the digest pin for a model file (`<model>.sha256`).
#[must_use]
pub fn digest_path(model_path: &Path) -> PathBuf {
    let mut name = OsString::from(model_path.as_os_str());
    name.push(".sha256");
    PathBuf::from(name)
}

/// Lowercase hex SHA-256 of `bytes`.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

// Constant-time compare for ASCII strings (used for SHA-256 hex digests).
fn constant_time_eq_str(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff: u8 = 0;
    for (x, y) in a.as_bytes().iter().zip(b.as_bytes().iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

/// Gradient-boosted tree ensemble.
#[derive(Debug, Clone)]
pub struct TreeEnsemble {
    model: ExportedEnsemble,
    digest: String,
}

impl TreeEnsemble {
    /// Load and validate a model export.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, its digest pin does not
    /// match (or is required and absent), or the export is invalid.
    pub fn load(path: &Path, require_digest: bool) -> Result<Self, ModelError> {
        let bytes = std::fs::read(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let digest = sha256_hex(&bytes);

        let pin_path = digest_path(path);
        if pin_path.exists() {
            let pinned = std::fs::read_to_string(&pin_path).map_err(|source| ModelError::Io {
                path: pin_path.clone(),
                source,
            })?;
            // Accept both a bare digest and `sha256sum` output.
            let expected = pinned
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_ascii_lowercase();
            if !constant_time_eq_str(&expected, &digest) {
                return Err(ModelError::DigestMismatch {
                    expected,
                    actual: digest,
                });
            }
            tracing::info!("Model digest verified against {:?}", pin_path);
        } else if require_digest {
            return Err(ModelError::DigestMissing(pin_path));
        } else {
            tracing::warn!("No digest pin for model {:?}; loading unpinned", path);
        }

        let model: ExportedEnsemble = serde_json::from_slice(&bytes)?;
        Self::validate(&model)?;

        tracing::info!(
            "Loaded model from {:?} (schema={}, n_features={}, n_trees={})",
            path,
            model.schema.as_deref().unwrap_or("<undeclared>"),
            model.feature_names.len(),
            model.trees.len()
        );

        Ok(Self { model, digest })
    }

    /// Build from an in-memory export (no digest pin).
    ///
    /// # Errors
    /// Returns error if the JSON is malformed or the export is invalid.
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        let model: ExportedEnsemble = serde_json::from_str(json)?;
        Self::validate(&model)?;
        Ok(Self {
            digest: sha256_hex(json.as_bytes()),
            model,
        })
    }

    fn validate(model: &ExportedEnsemble) -> Result<(), ModelError> {
        if model.format_version != SUPPORTED_FORMAT_VERSION {
            return Err(ModelError::Invalid(format!(
                "unsupported format_version {} (expected {SUPPORTED_FORMAT_VERSION})",
                model.format_version
            )));
        }

        let n = model.feature_names.len();
        if n == 0 {
            return Err(ModelError::Invalid("feature_names is empty".into()));
        }
        let unique: BTreeSet<_> = model.feature_names.iter().collect();
        if unique.len() != n {
            return Err(ModelError::Invalid("feature_names contains duplicates".into()));
        }

        if !(model.threshold > 0.0 && model.threshold < 1.0) {
            return Err(ModelError::Invalid(format!(
                "threshold {} outside (0, 1)",
                model.threshold
            )));
        }
        if !model.base_score.is_finite() {
            return Err(ModelError::Invalid("base_score is not finite".into()));
        }
        if model.trees.is_empty() {
            return Err(ModelError::Invalid("ensemble has no trees".into()));
        }

        for (t, tree) in model.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(ModelError::Invalid(format!("tree {t} has no nodes")));
            }
            for (i, node) in tree.nodes.iter().enumerate() {
                match *node {
                    TreeNode::Split {
                        feature,
                        threshold,
                        left,
                        right,
                    } => {
                        if feature >= n {
                            return Err(ModelError::Invalid(format!(
                                "tree {t} node {i}: feature {feature} out of range (n_features={n})"
                            )));
                        }
                        if !threshold.is_finite() {
                            return Err(ModelError::Invalid(format!(
                                "tree {t} node {i}: threshold is not finite"
                            )));
                        }
                        // Children strictly after the parent keeps every walk finite.
                        for child in [left, right] {
                            if child <= i || child >= tree.nodes.len() {
                                return Err(ModelError::Invalid(format!(
                                    "tree {t} node {i}: child {child} out of order or range"
                                )));
                            }
                        }
                    }
                    TreeNode::Leaf { leaf } => {
                        if !leaf.is_finite() {
                            return Err(ModelError::Invalid(format!(
                                "tree {t} node {i}: leaf value is not finite"
                            )));
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// SHA-256 of the loaded export.
    #[must_use]
    pub fn digest(&self) -> &str {
        &self.digest
    }

    #[must_use]
    pub fn n_features(&self) -> usize {
        self.model.feature_names.len()
    }

    #[must_use]
    pub fn n_trees(&self) -> usize {
        self.model.trees.len()
    }

    /// Raw margin (log-odds) for a dense row.
    ///
    /// # Errors
    /// Returns `PredictorError::WidthMismatch` if `row` has the wrong length.
    pub fn margin(&self, row: &[f64]) -> Result<f64, PredictorError> {
        let expected = self.n_features();
        if row.len() != expected {
            return Err(PredictorError::WidthMismatch {
                expected,
                got: row.len(),
            });
        }

        let mut margin = self.model.base_score;
        for (t, tree) in self.model.trees.iter().enumerate() {
            margin += Self::walk(tree, row)
                .ok_or_else(|| PredictorError::Evaluation(format!("tree {t} walk failed")))?;
        }
        Ok(margin)
    }

    fn walk(tree: &ExportedTree, row: &[f64]) -> Option<f64> {
        let mut idx = 0;
        loop {
            match *tree.nodes.get(idx)? {
                TreeNode::Leaf { leaf } => return Some(leaf),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if *row.get(feature)? < threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }

    /// Positive-class probability for a dense row.
    ///
    /// # Errors
    /// See [`TreeEnsemble::margin`].
    pub fn probability_row(&self, row: &[f64]) -> Result<f64, PredictorError> {
        self.margin(row).map(sigmoid)
    }

    /// Label for a dense row.
    ///
    /// # Errors
    /// See [`TreeEnsemble::margin`].
    pub fn predict_row(&self, row: &[f64]) -> Result<Label, PredictorError> {
        let p = self.probability_row(row)?;
        Ok(if p > self.model.threshold {
            Label::Positive
        } else {
            Label::Negative
        })
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl Predictor for TreeEnsemble {
    fn predict(&self, features: &FeatureVector) -> Result<Label, PredictorError> {
        self.predict_row(&features.to_f64())
    }

    fn probability(&self, features: &FeatureVector) -> Result<Option<f64>, PredictorError> {
        self.probability_row(&features.to_f64()).map(Some)
    }

    fn declared_features(&self) -> Option<&[String]> {
        Some(&self.model.feature_names)
    }

    fn declared_schema(&self) -> Option<&str> {
        self.model.schema.as_deref()
    }
}
