//! CSV adapter: Implementation of TabularSource.
//!
//! Loads the reference dataset once and serves numeric columns from memory.
//! The file must have a header row; a UTF-8 BOM on the first header is
//! ignored and every field is trimmed.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use ::csv::{ReaderBuilder, StringRecord, Trim};

use crate::ports::TabularSource;

/// Error type for dataset operations.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Cannot open dataset {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("Column not found: {0}")]
    MissingColumn(String),

    #[error("Column {column}, row {row}: {value:?} is not a number")]
    NotNumeric {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Dataset has no data rows")]
    Empty,
}

/// In-memory CSV dataset.
#[derive(Debug, Clone)]
pub struct CsvDataset {
    headers: Vec<String>,
    records: Vec<StringRecord>,
}

impl CsvDataset {
    /// Load a dataset from a CSV file.
    ///
    /// # Errors
    /// Returns error if the file cannot be opened, is not valid CSV, or has
    /// no data rows.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_reader(file)?;

        tracing::info!(
            "Loaded dataset from {:?} ({} rows, {} columns)",
            path,
            dataset.records.len(),
            dataset.headers.len()
        );
        Ok(dataset)
    }

    /// Load a dataset from any reader.
    ///
    /// # Errors
    /// Returns error if the input is not valid CSV or has no data rows.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = reader
            .headers()?
            .iter()
            .map(|h| h.trim_matches('\u{feff}').to_string())
            .collect();
        let records = reader.records().collect::<Result<Vec<_>, _>>()?;

        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        Ok(Self { headers, records })
    }

    fn column_index(&self, name: &str) -> Result<usize, DatasetError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
    }
}

impl TabularSource for CsvDataset {
    type Error = DatasetError;

    fn numeric_column(&self, name: &str) -> Result<Vec<f64>, Self::Error> {
        let idx = self.column_index(name)?;

        self.records
            .iter()
            .enumerate()
            .map(|(row, record)| {
                let value = record.get(idx).unwrap_or_default();
                value.parse::<f64>().map_err(|_| DatasetError::NotNumeric {
                    column: name.to_string(),
                    row: row + 1,
                    value: value.to_string(),
                })
            })
            .collect()
    }

    fn column_names(&self) -> Vec<String> {
        self.headers.clone()
    }

    fn row_count(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "\u{feff}gender,age,hypertension,heart_disease,smoking_history,bmi,HbA1c_level,blood_glucose_level,diabetes
Female,80.0,0,1,never,25.19,6.6,140,0
Female,54.0,0,0,No Info,27.32,6.6,80,0
Male,28.0,0,0,never,27.32,5.7,158,0
Female,0.08,0,0,No Info,13.99,4.0,145,0
";

    #[test]
    fn test_numeric_column() {
        let dataset = CsvDataset::from_reader(SAMPLE.as_bytes()).expect("parse");

        assert_eq!(dataset.row_count(), 4);
        assert_eq!(dataset.column_names()[0], "gender");
        assert_eq!(
            dataset.numeric_column("age").expect("age"),
            vec![80.0, 54.0, 28.0, 0.08]
        );
    }

    #[test]
    fn test_missing_column() {
        let dataset = CsvDataset::from_reader(SAMPLE.as_bytes()).expect("parse");
        let err = dataset.numeric_column("insulin").expect_err("must fail");
        assert!(matches!(err, DatasetError::MissingColumn(c) if c == "insulin"));
    }

    #[test]
    fn test_non_numeric_cell() {
        let dataset = CsvDataset::from_reader(SAMPLE.as_bytes()).expect("parse");
        let err = dataset.numeric_column("gender").expect_err("must fail");
        assert!(matches!(err, DatasetError::NotNumeric { row: 1, .. }));
    }

    #[test]
    fn test_header_only_is_empty() {
        let err = CsvDataset::from_reader("age,bmi\n".as_bytes()).expect_err("must fail");
        assert!(matches!(err, DatasetError::Empty));
    }

    #[test]
    fn test_ragged_rows_are_malformed() {
        let err = CsvDataset::from_reader("age,bmi\n1,2\n3\n".as_bytes()).expect_err("must fail");
        assert!(matches!(err, DatasetError::Csv(_)));
    }

    #[test]
    fn test_open_file() {
        let mut file = NamedTempFile::new().expect("tempfile");
        file.write_all(SAMPLE.as_bytes()).expect("write");

        let dataset = CsvDataset::open(file.path()).expect("open");
        assert_eq!(dataset.row_count(), 4);
    }

    #[test]
    fn test_open_missing_file() {
        let err = CsvDataset::open("/nonexistent/diabetes.csv").expect_err("must fail");
        assert!(matches!(err, DatasetError::Io { .. }));
        assert!(err.to_string().contains("diabetes.csv"));
    }
}
