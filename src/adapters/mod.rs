//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual integration with external formats:
//! - `csv`: the reference dataset, read with the `csv` crate
//! - `ensemble`: gradient-boosted tree ensemble exported as JSON

pub mod csv;
pub mod ensemble;

pub use self::csv::{CsvDataset, DatasetError};
pub use self::ensemble::{ModelError, TreeEnsemble};
