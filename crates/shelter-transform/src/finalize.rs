//! Export column selection and the final text pass.

use polars::prelude::{Column, DataFrame, DataType};
use tracing::{debug, warn};

use shelter_common::{column_names, normalize_text, select_columns, text_column, text_values};
use shelter_model::columns::{
    ANIMAL_DIMENSION_COLUMNS, DIMENSION_ONLY_PREFIXES, EVENT_LEADING_COLUMNS,
    LENGTH_OF_STAY_COLUMNS,
};

use crate::error::Result;

/// Moves `first` to the front, keeping the remaining columns in order.
///
/// Names in `first` that the frame lacks are skipped.
pub fn reorder_columns(df: &DataFrame, first: &[&str]) -> Result<DataFrame> {
    let names = column_names(df);
    let mut order: Vec<&str> = first
        .iter()
        .copied()
        .filter(|name| names.iter().any(|n| n == name))
        .collect();
    order.extend(
        names
            .iter()
            .map(String::as_str)
            .filter(|name| !first.contains(name)),
    );
    Ok(select_columns(df, &order)?)
}

/// Trims and lowercases every text column; blank cells become null.
pub fn normalize_text_frame(df: &DataFrame) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        if column.dtype() != &DataType::String {
            columns.push(column.clone());
            continue;
        }
        let name = column.name().to_string();
        let values = text_values(df, &name)
            .unwrap_or_default()
            .into_iter()
            .map(|value| value.as_deref().and_then(normalize_text))
            .collect();
        columns.push(text_column(&name, values));
    }
    Ok(DataFrame::new(columns)?)
}

/// Whether a column only exists to build the animal dimension.
pub fn is_dimension_only(name: &str) -> bool {
    DIMENSION_ONLY_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
}

/// Intake or outcome export: dimension-only columns dropped, identity
/// columns first, text normalized.
pub fn finalize_event_table(df: &DataFrame) -> Result<DataFrame> {
    let kept: Vec<String> = column_names(df)
        .into_iter()
        .filter(|name| !is_dimension_only(name))
        .collect();
    let dropped = df.width() - kept.len();
    if dropped > 0 {
        debug!(dropped, "dimension-only columns dropped");
    }
    let kept: Vec<&str> = kept.iter().map(String::as_str).collect();
    let df = select_columns(df, &kept)?;
    let df = reorder_columns(&df, &EVENT_LEADING_COLUMNS)?;
    normalize_text_frame(&df)
}

/// Animal dimension export from the merged attribute frame.
///
/// Each exported attribute is taken from one side of the merge; a source
/// column the merge did not produce is exported as all-null.
pub fn finalize_animal_table(merged: &DataFrame) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(ANIMAL_DIMENSION_COLUMNS.len());
    for (source, exported) in ANIMAL_DIMENSION_COLUMNS {
        match merged.column(source) {
            Ok(column) => columns.push(column.clone().with_name(exported.into())),
            Err(_) => {
                warn!(column = source, "merged attribute missing; exported as null");
                columns.push(text_column(exported, vec![None; merged.height()]));
            }
        }
    }
    let df = DataFrame::new(columns)?;
    normalize_text_frame(&df)
}

/// Length-of-stay export columns, in order.
pub fn finalize_los_table(df: &DataFrame) -> Result<DataFrame> {
    Ok(select_columns(df, &LENGTH_OF_STAY_COLUMNS)?)
}
