//! Per-feature value ranges derived from the reference dataset.
//!
//! Bounds seed and clamp the form's sliders. They are computed once at
//! startup and never change afterwards.

use std::collections::BTreeMap;

use super::patient::{Field, NumericKind};

/// Errors that can occur while computing or reading bounds.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BoundsError {
    #[error("Dataset unavailable: {0}")]
    DataUnavailable(String),

    #[error("No bounds loaded for feature {0}")]
    UnknownFeature(String),

    #[error("Feature {feature} is {actual:?}, not {requested:?}")]
    KindMismatch {
        feature: String,
        requested: NumericKind,
        actual: NumericKind,
    },
}

/// Inclusive `(min, max)` range in the feature's native type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bounds {
    Integer { min: i64, max: i64 },
    Real { min: f64, max: f64 },
}

impl Bounds {
    #[must_use]
    pub fn kind(&self) -> NumericKind {
        match self {
            Self::Integer { .. } => NumericKind::Integer,
            Self::Real { .. } => NumericKind::Real,
        }
    }

    /// Lower bound widened to `f64`.
    #[must_use]
    pub fn min_f64(&self) -> f64 {
        match *self {
            Self::Integer { min, .. } => min as f64,
            Self::Real { min, .. } => min,
        }
    }

    /// Upper bound widened to `f64`.
    #[must_use]
    pub fn max_f64(&self) -> f64 {
        match *self {
            Self::Integer { max, .. } => max as f64,
            Self::Real { max, .. } => max,
        }
    }

    /// Clamp into range. Integer bounds also round to the nearest integer.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        match *self {
            Self::Integer { min, max } => value.round().clamp(min as f64, max as f64),
            Self::Real { min, max } => value.clamp(min, max),
        }
    }

    /// Smallest range covering `values`.
    ///
    /// Returns `None` if `values` is empty or holds a non-finite value.
    #[must_use]
    pub fn spanning(kind: NumericKind, values: &[f64]) -> Option<Self> {
        let (min, max) = values
            .iter()
            .try_fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (!v.is_nan()).then(|| (lo.min(v), hi.max(v)))
            })?;
        if !min.is_finite() || !max.is_finite() {
            return None;
        }

        Some(match kind {
            // Truncate toward zero, as an `int()` cast of the column min/max would.
            NumericKind::Integer => Self::Integer {
                min: min.trunc() as i64,
                max: max.trunc() as i64,
            },
            NumericKind::Real => Self::Real { min, max },
        })
    }
}

/// Read-only mapping from dataset column name to [`Bounds`].
#[derive(Debug, Clone, Default)]
pub struct BoundsTable {
    entries: BTreeMap<String, Bounds>,
}

impl BoundsTable {
    /// Build a table from known ranges.
    #[must_use]
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Bounds)>,
        K: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(k, b)| (k.into(), b)).collect(),
        }
    }

    /// # Errors
    /// Returns [`BoundsError::UnknownFeature`] if the feature was not loaded.
    pub fn get(&self, feature: &str) -> Result<Bounds, BoundsError> {
        self.entries
            .get(feature)
            .copied()
            .ok_or_else(|| BoundsError::UnknownFeature(feature.to_string()))
    }

    /// Integer `(min, max)` for a feature.
    ///
    /// # Errors
    /// Fails if the feature is unknown or is not an integer feature.
    pub fn integer(&self, feature: &str) -> Result<(i64, i64), BoundsError> {
        match self.get(feature)? {
            Bounds::Integer { min, max } => Ok((min, max)),
            other => Err(BoundsError::KindMismatch {
                feature: feature.to_string(),
                requested: NumericKind::Integer,
                actual: other.kind(),
            }),
        }
    }

    /// Real `(min, max)` for a feature.
    ///
    /// # Errors
    /// Fails if the feature is unknown or is not a real feature.
    pub fn real(&self, feature: &str) -> Result<(f64, f64), BoundsError> {
        match self.get(feature)? {
            Bounds::Real { min, max } => Ok((min, max)),
            other => Err(BoundsError::KindMismatch {
                feature: feature.to_string(),
                requested: NumericKind::Real,
                actual: other.kind(),
            }),
        }
    }

    /// Bounds for a patient field, looked up by its dataset column.
    ///
    /// # Errors
    /// Returns [`BoundsError::UnknownFeature`] if the field was not loaded.
    pub fn field(&self, field: Field) -> Result<Bounds, BoundsError> {
        self.get(field.dataset_column())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Bounds)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> BoundsTable {
        BoundsTable::from_entries([
            ("age", Bounds::Integer { min: 0, max: 80 }),
            (
                "bmi",
                Bounds::Real {
                    min: 10.01,
                    max: 95.69,
                },
            ),
        ])
    }

    #[test]
    fn test_spanning_truncates_integers() {
        let bounds = Bounds::spanning(NumericKind::Integer, &[0.08, 80.0, 44.0]).expect("bounds");
        assert_eq!(bounds, Bounds::Integer { min: 0, max: 80 });

        let bounds = Bounds::spanning(NumericKind::Real, &[27.3, 10.01, 95.69]).expect("bounds");
        assert_eq!(
            bounds,
            Bounds::Real {
                min: 10.01,
                max: 95.69
            }
        );
    }

    #[test]
    fn test_spanning_rejects_empty_and_non_finite() {
        assert!(Bounds::spanning(NumericKind::Real, &[]).is_none());
        assert!(Bounds::spanning(NumericKind::Real, &[20.0, f64::NAN]).is_none());
        assert!(Bounds::spanning(NumericKind::Integer, &[1.0, f64::INFINITY]).is_none());
    }

    #[test]
    fn test_lookup_errors() {
        let table = table();

        assert_eq!(table.integer("age"), Ok((0, 80)));
        assert_eq!(
            table.get("insulin"),
            Err(BoundsError::UnknownFeature("insulin".into()))
        );
        assert!(matches!(
            table.real("age"),
            Err(BoundsError::KindMismatch {
                requested: NumericKind::Real,
                actual: NumericKind::Integer,
                ..
            })
        ));
        assert!(table.field(Field::Bmi).is_ok());
        assert!(table.field(Field::HbA1cLevel).is_err());
    }

    #[test]
    fn test_clamp() {
        let age = Bounds::Integer { min: 0, max: 80 };
        assert!((age.clamp(95.0) - 80.0).abs() < f64::EPSILON);
        assert!((age.clamp(24.6) - 25.0).abs() < f64::EPSILON);

        let bmi = Bounds::Real {
            min: 10.0,
            max: 95.0,
        };
        assert!((bmi.clamp(5.0) - 10.0).abs() < f64::EPSILON);
        assert!((bmi.clamp(22.0) - 22.0).abs() < f64::EPSILON);
    }
}
