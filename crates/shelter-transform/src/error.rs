//! Error types for the transformation stages.

use thiserror::Error;

/// Errors that abort a transformation stage.
///
/// Missing classification columns and unparseable values are not errors;
/// stages log and degrade instead.
#[derive(Debug, Error)]
pub enum TransformError {
    /// `animal_id` or `datetime` is absent from a table.
    #[error("{table}: required identity column '{column}' not found")]
    MissingIdentity { table: String, column: String },

    /// A taxonomy term list could not be compiled into a matcher.
    #[error("taxonomy {taxonomy} has an invalid term pattern: {message}")]
    Pattern { taxonomy: String, message: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for transformation operations.
pub type Result<T> = std::result::Result<T, TransformError>;
