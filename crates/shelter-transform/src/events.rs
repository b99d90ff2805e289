//! Event-level classification: intake condition and outcome type/subtype.

use std::time::Instant;

use polars::prelude::DataFrame;
use tracing::{info, warn};

use shelter_common::{bool_column, has_column, text_column, text_values};
use shelter_model::columns::{
    INTAKE_CONDITION, INTAKE_REASON, OUTCOME_CATEGORY, OUTCOME_SUBCATEGORY, OUTCOME_SUBTYPE,
    OUTCOME_TYPE, PREGNANT_OR_NURSING,
};
use shelter_model::TableKind;
use shelter_model::taxonomy::REPRODUCTIVE_CONDITIONS;

use crate::classify::{Classifier, Classifiers};
use crate::error::Result;

/// Whether an intake condition is pregnancy or nursing.
pub fn is_pregnant_or_nursing(condition: Option<&str>) -> bool {
    condition.is_some_and(|value| {
        let value = value.trim().to_lowercase();
        REPRODUCTIVE_CONDITIONS.contains(&value.as_str())
    })
}

/// Adds `pregnant_or_nursing` and `intake_reason` from `intake_condition`.
pub fn classify_intake_condition(
    df: DataFrame,
    table: TableKind,
    classifiers: &Classifiers,
) -> Result<DataFrame> {
    let Some(conditions) = source_values(&df, table, INTAKE_CONDITION) else {
        return Ok(df);
    };
    let start = Instant::now();
    let flags: Vec<bool> = conditions
        .iter()
        .map(|c| is_pregnant_or_nursing(c.as_deref()))
        .collect();
    let reasons = classify_all(&conditions, &classifiers.intake_condition);

    let mut df = df;
    df.with_column(bool_column(PREGNANT_OR_NURSING, flags))?;
    df.with_column(text_column(INTAKE_REASON, reasons))?;
    info!(
        table = %table,
        rows = df.height(),
        duration_ms = start.elapsed().as_millis(),
        "intake conditions classified"
    );
    Ok(df)
}

/// Adds `outcome_category` from `outcome_type`.
pub fn classify_outcome_type(
    df: DataFrame,
    table: TableKind,
    classifiers: &Classifiers,
) -> Result<DataFrame> {
    let Some(types) = source_values(&df, table, OUTCOME_TYPE) else {
        return Ok(df);
    };
    let categories = classify_all(&types, &classifiers.outcome_type);
    let mut df = df;
    df.with_column(text_column(OUTCOME_CATEGORY, categories))?;
    info!(table = %table, rows = df.height(), "outcome types classified");
    Ok(df)
}

/// Adds `outcome_subcategory` from `outcome_subtype`.
pub fn classify_outcome_subtype(
    df: DataFrame,
    table: TableKind,
    classifiers: &Classifiers,
) -> Result<DataFrame> {
    let Some(subtypes) = source_values(&df, table, OUTCOME_SUBTYPE) else {
        return Ok(df);
    };
    let subcategories = classify_all(&subtypes, &classifiers.outcome_subtype);
    let mut df = df;
    df.with_column(text_column(OUTCOME_SUBCATEGORY, subcategories))?;
    info!(table = %table, rows = df.height(), "outcome subtypes classified");
    Ok(df)
}

fn source_values(df: &DataFrame, table: TableKind, column: &str) -> Option<Vec<Option<String>>> {
    if !has_column(df, column) {
        warn!(table = %table, column, "column not found; classification skipped");
        return None;
    }
    text_values(df, column)
}

fn classify_all(values: &[Option<String>], classifier: &Classifier) -> Vec<Option<String>> {
    values
        .iter()
        .map(|value| classifier.classify(value.as_deref()).map(str::to_string))
        .collect()
}
