//! Bounds loading: derives slider ranges from a tabular source.

use crate::domain::{Bounds, BoundsError, BoundsTable, Field, NumericKind};
use crate::ports::TabularSource;

/// Compute `(min, max)` for each requested column.
///
/// # Errors
/// Any source failure (missing column, non-numeric cell) and any column
/// that is empty or holds NaN is reported as [`BoundsError::DataUnavailable`].
pub fn load_bounds<S>(source: &S, features: &[(&str, NumericKind)]) -> Result<BoundsTable, BoundsError>
where
    S: TabularSource + ?Sized,
{
    let mut entries = Vec::with_capacity(features.len());

    for &(name, kind) in features {
        let values = source
            .numeric_column(name)
            .map_err(|e| BoundsError::DataUnavailable(e.to_string()))?;

        let bounds = Bounds::spanning(kind, &values).ok_or_else(|| {
            BoundsError::DataUnavailable(format!("column {name} has no usable values"))
        })?;
        tracing::debug!("Bounds for {}: {:?}", name, bounds);

        entries.push((name.to_string(), bounds));
    }

    Ok(BoundsTable::from_entries(entries))
}

/// Bounds for every numeric patient field, keyed by dataset column.
///
/// # Errors
/// See [`load_bounds`].
pub fn load_patient_bounds<S>(source: &S) -> Result<BoundsTable, BoundsError>
where
    S: TabularSource + ?Sized,
{
    let features: Vec<_> = Field::numeric()
        .map(|(field, kind)| (field.dataset_column(), kind))
        .collect();
    let table = load_bounds(source, &features)?;

    tracing::info!(
        "Derived bounds for {} features from {} rows",
        table.len(),
        source.row_count()
    );
    Ok(table)
}
