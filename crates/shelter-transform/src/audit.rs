//! Integrity checks over built tables.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use polars::prelude::{DataFrame, DataType};
use serde::Serialize;
use tracing::{debug, warn};

use shelter_common::{column_names, text_values};
use shelter_model::Season;
use shelter_model::columns::{LINE_ID, SEASON, WEEKDAY};

use crate::frame::EventFrame;

/// How many values the frequency listing keeps per column.
pub const TOP_VALUES: usize = 10;

/// Day names a parsed timestamp can produce.
pub const EXPECTED_WEEKDAYS: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

/// Findings for one table.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TableAudit {
    pub rows: usize,
    /// Null count per column, in column order.
    pub null_counts: Vec<(String, usize)>,
    /// Repeated `line_id` values; `None` when the table has no `line_id`.
    pub duplicate_line_ids: Option<usize>,
    /// Rows whose season is not one of the four seasons.
    pub unexpected_seasons: Option<usize>,
    /// Rows whose weekday is not a day name.
    pub unexpected_weekdays: Option<usize>,
    /// Most frequent values of every text column, most frequent first.
    pub top_values: Vec<(String, Vec<(String, usize)>)>,
}

impl TableAudit {
    /// Total null cells across every column.
    pub fn total_nulls(&self) -> usize {
        self.null_counts.iter().map(|(_, count)| count).sum()
    }

    /// Whether any integrity count is non-zero.
    pub fn has_findings(&self) -> bool {
        [
            self.duplicate_line_ids,
            self.unexpected_seasons,
            self.unexpected_weekdays,
        ]
        .into_iter()
        .flatten()
        .any(|count| count > 0)
    }
}

/// Audits one table and logs the findings at debug level.
pub fn audit_table(frame: &EventFrame) -> TableAudit {
    let df = &frame.data;
    let table = frame.table;

    let null_counts: Vec<(String, usize)> = df
        .get_columns()
        .iter()
        .map(|column| (column.name().to_string(), column.null_count()))
        .collect();

    let duplicate_line_ids = text_values(df, LINE_ID).map(|ids| {
        let mut seen = HashSet::with_capacity(ids.len());
        ids.into_iter().filter(|id| !seen.insert(id.clone())).count()
    });
    if duplicate_line_ids.is_none() {
        debug!(table = %table, "line_id not found for duplicate check");
    }

    let unexpected_seasons = count_outside(df, SEASON, &Season::EXPECTED);
    let unexpected_weekdays = count_outside(df, WEEKDAY, &EXPECTED_WEEKDAYS);

    let top_values: Vec<(String, Vec<(String, usize)>)> = df
        .get_columns()
        .iter()
        .filter(|column| column.dtype() == &DataType::String)
        .map(|column| {
            let name = column.name().to_string();
            let values = text_values(df, &name).unwrap_or_default();
            (name, most_frequent(&values, TOP_VALUES))
        })
        .collect();

    let audit = TableAudit {
        rows: df.height(),
        null_counts,
        duplicate_line_ids,
        unexpected_seasons,
        unexpected_weekdays,
        top_values,
    };

    for (column, nulls) in &audit.null_counts {
        debug!(table = %table, column = %column, nulls, "null check");
    }
    for (column, values) in &audit.top_values {
        debug!(table = %table, column = %column, top = ?values, "value frequencies");
    }
    if audit.has_findings() {
        warn!(
            table = %table,
            duplicate_line_ids = audit.duplicate_line_ids.unwrap_or(0),
            unexpected_seasons = audit.unexpected_seasons.unwrap_or(0),
            unexpected_weekdays = audit.unexpected_weekdays.unwrap_or(0),
            "table audit found integrity issues"
        );
    } else {
        debug!(table = %table, rows = audit.rows, "table audit clean");
    }
    audit
}

fn count_outside(df: &DataFrame, column: &str, expected: &[&str]) -> Option<usize> {
    let values = text_values(df, column)?;
    Some(
        values
            .iter()
            .filter(|value| !value.as_deref().is_some_and(|v| expected.contains(&v)))
            .count(),
    )
}

/// The `limit` most frequent non-null values; ties break alphabetically.
pub fn most_frequent(values: &[Option<String>], limit: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values.iter().flatten() {
        *counts.entry(value.as_str()).or_default() += 1;
    }
    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts.truncate(limit);
    counts
}

/// Columns shared by each pair of tables, keyed `"<a> & <b>"` with `a < b`.
///
/// Pairs with nothing in common are left out.
pub fn overlapping_columns(tables: &[(&str, &DataFrame)]) -> BTreeMap<String, Vec<String>> {
    let sets: Vec<(&str, BTreeSet<String>)> = tables
        .iter()
        .map(|(name, df)| (*name, column_names(df).into_iter().collect()))
        .collect();
    let mut overlaps = BTreeMap::new();
    for (first, first_columns) in &sets {
        for (second, second_columns) in &sets {
            if first >= second {
                continue;
            }
            let common: Vec<String> = first_columns
                .intersection(second_columns)
                .cloned()
                .collect();
            if !common.is_empty() {
                overlaps.insert(format!("{first} & {second}"), common);
            }
        }
    }
    overlaps
}
