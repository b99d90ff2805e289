//! Polars AnyValue and column utility functions.
//!
//! This module provides helper functions for working with Polars `AnyValue` types,
//! including string conversions and numeric parsing, plus the column read/write
//! helpers shared by the pipeline stages.

use polars::prelude::{AnyValue, Column, DataFrame, DataType, NamedFrom, PolarsResult, Series};

/// Converts a Polars `AnyValue` to a `String` representation.
///
/// Returns an empty string for `Null`, properly formats numeric types without
/// unnecessary trailing zeros.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use shelter_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Int32(42)), "42");
/// assert_eq!(any_to_string(AnyValue::String("hello")), "hello");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Converts `AnyValue` to `String`, returning `None` for nulls and blank text.
pub fn any_to_text(value: AnyValue<'_>) -> Option<String> {
    non_empty(&any_to_string(value))
}

/// Formats a floating-point number as a string without trailing zeros.
fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Converts an `AnyValue` to `f64`, returning `None` for non-numeric or null values.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(&s),
        _ => None,
    }
}

/// Parses a string as `f64`, returning `None` for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Trims a value, returning `None` when nothing is left.
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Trims and lowercases a value; blank values become `None`.
///
/// # Examples
///
/// ```
/// use shelter_common::normalize_text;
///
/// assert_eq!(normalize_text("  Spayed Female "), Some("spayed female".to_string()));
/// assert_eq!(normalize_text("   "), None);
/// ```
pub fn normalize_text(value: &str) -> Option<String> {
    non_empty(value).map(|v| v.to_lowercase())
}

pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.column(name).is_ok()
}

/// Extract every cell of a column as optional text.
///
/// Returns `None` when the column does not exist.
pub fn text_values(df: &DataFrame, name: &str) -> Option<Vec<Option<String>>> {
    let column = df.column(name).ok()?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(any_to_text(column.get(idx).unwrap_or(AnyValue::Null)));
    }
    Some(values)
}

/// Build a nullable string column.
pub fn text_column(name: &str, values: Vec<Option<String>>) -> Column {
    Series::new(name.into(), values).into()
}

pub fn f64_column(name: &str, values: Vec<Option<f64>>) -> Column {
    Series::new(name.into(), values).into()
}

pub fn i32_column(name: &str, values: Vec<Option<i32>>) -> Column {
    Series::new(name.into(), values).into()
}

pub fn i64_column(name: &str, values: Vec<Option<i64>>) -> Column {
    Series::new(name.into(), values).into()
}

pub fn bool_column(name: &str, values: Vec<bool>) -> Column {
    Series::new(name.into(), values).into()
}

/// Build a copy of `column` holding the rows at `indices`; `None` yields a null.
///
/// Boolean, integer and float columns keep their type, everything else is
/// gathered as text.
pub fn gather_rows(column: &Column, name: &str, indices: &[Option<usize>]) -> Column {
    let value_at = |idx: &Option<usize>| match idx {
        Some(idx) => column.get(*idx).unwrap_or(AnyValue::Null),
        None => AnyValue::Null,
    };
    match column.dtype() {
        DataType::Boolean => {
            let values: Vec<Option<bool>> = indices
                .iter()
                .map(|idx| match value_at(idx) {
                    AnyValue::Boolean(b) => Some(b),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values).into()
        }
        DataType::Int8 | DataType::Int16 | DataType::Int32 => {
            let values: Vec<Option<i32>> = indices
                .iter()
                .map(|idx| any_to_f64(value_at(idx)).map(|v| v as i32))
                .collect();
            i32_column(name, values)
        }
        DataType::Int64 | DataType::UInt8 | DataType::UInt16 | DataType::UInt32 => {
            let values: Vec<Option<i64>> = indices
                .iter()
                .map(|idx| any_to_f64(value_at(idx)).map(|v| v as i64))
                .collect();
            i64_column(name, values)
        }
        DataType::Float32 | DataType::Float64 => {
            let values: Vec<Option<f64>> =
                indices.iter().map(|idx| any_to_f64(value_at(idx))).collect();
            f64_column(name, values)
        }
        _ => {
            let values: Vec<Option<String>> =
                indices.iter().map(|idx| any_to_text(value_at(idx))).collect();
            text_column(name, values)
        }
    }
}

/// Copy the named columns, in the given order, into a new frame.
pub fn select_columns(df: &DataFrame, names: &[&str]) -> PolarsResult<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(names.len());
    for name in names {
        columns.push(df.column(name)?.clone());
    }
    DataFrame::new(columns)
}

/// Copy every column except the named ones into a new frame.
pub fn without_columns(df: &DataFrame, names: &[&str]) -> PolarsResult<DataFrame> {
    let kept: Vec<Column> = df
        .get_columns()
        .iter()
        .filter(|column| !names.contains(&column.name().as_str()))
        .cloned()
        .collect();
    DataFrame::new(kept)
}

/// Names of every column, in frame order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}
