//! Delimited event file reading.

use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use tracing::{error, info};

use crate::error::{IngestError, Result};

/// Reads a delimited event file with every column typed as text.
///
/// Schema inference is disabled so ages like `"2 years"` and ids like
/// `"A006100"` reach the normalizers untouched.
pub fn read_event_csv(path: &Path) -> Result<DataFrame> {
    std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    Ok(df)
}

/// Loads one source table, logging instead of failing.
///
/// A table that cannot be loaded is `None`; every stage downstream of it
/// short-circuits while independent tables still build.
pub fn load_event_table(path: &Path, table: &str) -> Option<DataFrame> {
    info!(table, path = %path.display(), "loading source table");
    match read_event_csv(path) {
        Ok(df) => {
            info!(table, rows = df.height(), columns = df.width(), "source table loaded");
            Some(df)
        }
        Err(err) => {
            error!(table, path = %path.display(), error = %err, "source table could not be loaded");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn reads_every_column_as_text() {
        let file = create_temp_csv("Animal ID,Age upon Intake\nA1,2 years\nA2,10\n");
        let df = read_event_csv(file.path()).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 2);
        for column in df.get_columns() {
            assert_eq!(column.dtype(), &polars::prelude::DataType::String);
        }
    }

    #[test]
    fn missing_file_is_reported() {
        let err = read_event_csv(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }

    #[test]
    fn load_event_table_returns_none_for_missing_file() {
        assert!(load_event_table(Path::new("/definitely/not/here.csv"), "intake").is_none());
    }
}
