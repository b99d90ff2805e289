//! Named table wrapper passed between pipeline stages.

use polars::prelude::DataFrame;

use shelter_common::has_column;
use shelter_model::TableKind;

use crate::error::{Result, TransformError};

/// A pipeline table together with the name it is logged and exported under.
#[derive(Debug, Clone)]
pub struct EventFrame {
    /// Which of the four pipeline tables this is.
    pub table: TableKind,
    /// The table contents.
    pub data: DataFrame,
}

impl EventFrame {
    pub fn new(table: TableKind, data: DataFrame) -> Self {
        Self { table, data }
    }

    /// Returns the number of records in the frame.
    pub fn record_count(&self) -> usize {
        self.data.height()
    }

    /// Returns the number of columns in the frame.
    pub fn column_count(&self) -> usize {
        self.data.width()
    }

    /// File name the table is exported under.
    pub fn file_name(&self) -> &'static str {
        self.table.file_name()
    }
}

/// Fails with [`TransformError::MissingIdentity`] unless every column exists.
pub(crate) fn require_identity(df: &DataFrame, table: TableKind, columns: &[&str]) -> Result<()> {
    match columns.iter().find(|column| !has_column(df, column)) {
        Some(column) => Err(TransformError::MissingIdentity {
            table: table.to_string(),
            column: (*column).to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelter_common::text_column;

    #[test]
    fn reports_shape_and_file_name() {
        let data = DataFrame::new(vec![text_column(
            "animal_id",
            vec![Some("a1".to_string()), Some("a2".to_string())],
        )])
        .unwrap();
        let frame = EventFrame::new(TableKind::Animal, data);
        assert_eq!(frame.record_count(), 2);
        assert_eq!(frame.column_count(), 1);
        assert_eq!(frame.file_name(), "animal_table.csv");
    }

    #[test]
    fn require_identity_names_the_missing_column() {
        let data = DataFrame::new(vec![text_column("animal_id", vec![None])]).unwrap();
        assert!(require_identity(&data, TableKind::Intake, &["animal_id"]).is_ok());
        let err = require_identity(&data, TableKind::Intake, &["animal_id", "datetime"])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "intake: required identity column 'datetime' not found"
        );
    }
}
