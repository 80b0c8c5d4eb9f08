//! Dataset port: Trait for the static reference dataset.
//!
//! The dataset is only ever read to derive input bounds.

/// Trait for column-oriented read access to a tabular dataset.
pub trait TabularSource {
    /// Error type for dataset reads.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Every value of a numeric column, in row order.
    ///
    /// # Errors
    /// Returns error if the column is missing or holds a non-numeric cell.
    fn numeric_column(&self, name: &str) -> Result<Vec<f64>, Self::Error>;

    /// Column names, in file order.
    fn column_names(&self) -> Vec<String>;

    /// Number of data rows.
    fn row_count(&self) -> usize;
}
