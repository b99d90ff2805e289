//! Shared utilities for the shelter pipeline crates.
//!
//! This crate provides the Polars helpers every stage uses to read a column
//! into plain Rust values and to write derived values back as a column.

pub mod polars;

// Re-export commonly used functions at crate root for convenience
pub use polars::{
    any_to_f64, any_to_string, any_to_text, bool_column, column_names, f64_column, gather_rows,
    has_column, i32_column, i64_column, non_empty, normalize_text, parse_f64, select_columns,
    text_column, text_values, without_columns,
};
