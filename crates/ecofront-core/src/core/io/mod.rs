//! CSV tables consumed and produced around the trade-off analysis.

pub mod reports;
pub mod table;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Row {row} has no column {column} ({name})")]
    MissingColumn {
        row: usize,
        column: usize,
        name: String,
    },
    #[error("Row {row}, column {column} ({name}): '{value}' is not a number")]
    InvalidNumber {
        row: usize,
        column: usize,
        name: String,
        value: String,
    },
    #[error("Row {row}, column {column} ({name}): '{value}' is not a finite number")]
    NonFiniteNumber {
        row: usize,
        column: usize,
        name: String,
        value: String,
    },
}
