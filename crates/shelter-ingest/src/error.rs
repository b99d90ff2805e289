//! Error types for shelter event ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading and normalizing a raw event table.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Event file not found.
    #[error("event file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file metadata.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the delimited file with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// An identity column (`animal_id`, `datetime`) is absent.
    #[error("{table}: required identity column '{column}' not found")]
    MissingIdentity { table: String, column: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
