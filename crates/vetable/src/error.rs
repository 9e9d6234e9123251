//! Error types for the Vetable library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Vetable operations.
#[derive(Debug, Error)]
pub enum VetableError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error decoding an XLSX/XLS workbook.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty table or no data to summarize.
    #[error("Empty table: {0}")]
    EmptyTable(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Vetable operations.
pub type Result<T> = std::result::Result<T, VetableError>;
