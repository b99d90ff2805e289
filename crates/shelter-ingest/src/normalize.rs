//! Raw event normalization: column names, duplicate events, text cells.

use std::collections::HashSet;
use std::time::Instant;

use polars::prelude::{AnyValue, BooleanChunked, Column, DataFrame, DataType, NewChunkedArray};
use tracing::{debug, info, info_span};

use shelter_common::{any_to_string, normalize_text, text_column, text_values};
use shelter_model::columns::{ANIMAL_ID, DATETIME};

use crate::error::{IngestError, Result};

/// Folds a raw header to lower snake case.
///
/// # Examples
///
/// ```
/// use shelter_ingest::canonical_column_name;
///
/// assert_eq!(canonical_column_name(" Animal ID "), "animal_id");
/// assert_eq!(canonical_column_name("Sex upon Outcome"), "sex_upon_outcome");
/// assert_eq!(canonical_column_name("\u{feff}DateTime"), "datetime");
/// ```
pub fn canonical_column_name(raw: &str) -> String {
    raw.trim_matches('\u{feff}')
        .trim()
        .to_lowercase()
        .replace(' ', "_")
}

/// Canonicalizes a raw event table.
///
/// Column names become lower snake case, exact duplicate events (same raw
/// `animal_id` and `datetime`) are dropped keeping the first, and every text
/// cell is trimmed and lowercased with blanks becoming null.
pub fn normalize_raw_events(mut df: DataFrame, table: &str) -> Result<DataFrame> {
    let span = info_span!("normalize_raw_events", table);
    let _guard = span.enter();
    let start = Instant::now();
    let rows_in = df.height();

    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| canonical_column_name(name))
        .collect();
    df.set_column_names(names)?;

    for required in [ANIMAL_ID, DATETIME] {
        if df.column(required).is_err() {
            return Err(IngestError::MissingIdentity {
                table: table.to_string(),
                column: required.to_string(),
            });
        }
    }

    let df = drop_duplicate_events(&df)?;
    let duplicates = rows_in - df.height();
    debug!(table, duplicates, "duplicate events dropped");

    let df = normalize_text_columns(df)?;
    info!(
        table,
        rows_in,
        rows_out = df.height(),
        duration_ms = start.elapsed().as_millis(),
        "raw events normalized"
    );
    Ok(df)
}

fn drop_duplicate_events(df: &DataFrame) -> Result<DataFrame> {
    if df.height() == 0 {
        return Ok(df.clone());
    }
    let ids = df.column(ANIMAL_ID)?;
    let times = df.column(DATETIME)?;
    let mut seen = HashSet::with_capacity(df.height());
    let mut keep = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let id = any_to_string(ids.get(idx).unwrap_or(AnyValue::Null));
        let time = any_to_string(times.get(idx).unwrap_or(AnyValue::Null));
        keep.push(seen.insert((id, time)));
    }
    let mask = BooleanChunked::from_slice("dedupe".into(), &keep);
    Ok(df.filter(&mask)?)
}

fn normalize_text_columns(df: DataFrame) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        if column.dtype() != &DataType::String {
            columns.push(column.clone());
            continue;
        }
        let name = column.name().to_string();
        let values = text_values(&df, &name)
            .unwrap_or_default()
            .into_iter()
            .map(|value| value.as_deref().and_then(normalize_text))
            .collect();
        columns.push(text_column(&name, values));
    }
    Ok(DataFrame::new(columns)?)
}
