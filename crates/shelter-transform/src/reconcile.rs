//! Per-animal attribute reconciliation.
//!
//! Each source table is reduced to one attribute row per `animal_id`, then the
//! intake-side and outcome-side rows are outer-joined on the id.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::time::Instant;

use polars::prelude::{AnyValue, Column, DataFrame};
use tracing::{debug, info, info_span, warn};

use shelter_common::{
    any_to_f64, column_names, gather_rows, select_columns, text_column, text_values,
};
use shelter_model::TableKind;
use shelter_model::columns::{
    AGE_YR, ANIMAL_ID, ANIMAL_TYPE, BREED, COLOR, INTAKE_SUFFIX, NAME, OUTCOME_SUFFIX,
};

use crate::attributes::{
    AGE_PREFIX, SEX_PREFIX, add_akc_group, add_cat_breed_group, add_hair_length,
    clean_age_column, clean_breed_column, clean_color_column, clean_name_column,
    clean_sex_column, clean_species_column,
};
use crate::classify::Classifiers;
use crate::error::Result;
use crate::frame::require_identity;

/// Whether a column feeds the animal attributes.
///
/// Identity, name, species, breed and color match exactly; age and sex match
/// any column starting with `age` or `sex`.
pub fn is_attribute_source(name: &str) -> bool {
    matches!(name, ANIMAL_ID | NAME | ANIMAL_TYPE | BREED | COLOR)
        || name.starts_with(AGE_PREFIX)
        || name.starts_with(SEX_PREFIX)
}

/// One attribute row per animal from one source table.
///
/// Rows are ordered by `age_yr` ascending with missing ages first (stable),
/// and the last row of each `animal_id` in that order is kept: a known, larger
/// age wins over a missing or smaller one.
pub fn animal_attributes(
    df: &DataFrame,
    table: TableKind,
    classifiers: &Classifiers,
) -> Result<DataFrame> {
    let span = info_span!("animal_attributes", table = %table);
    let _guard = span.enter();
    let start = Instant::now();
    require_identity(df, table, &[ANIMAL_ID])?;

    let sources: Vec<String> = column_names(df)
        .into_iter()
        .filter(|name| is_attribute_source(name))
        .collect();
    let sources: Vec<&str> = sources.iter().map(String::as_str).collect();
    let attributes = select_columns(df, &sources)?;

    let attributes = clean_name_column(attributes, table)?;
    let attributes = clean_age_column(attributes, table)?;
    let attributes = clean_sex_column(attributes, table)?;
    let attributes = clean_breed_column(attributes, table)?;
    let attributes = clean_species_column(attributes, table, classifiers)?;
    let attributes = add_akc_group(attributes, table, classifiers)?;
    let attributes = add_cat_breed_group(attributes, table, classifiers)?;
    let attributes = add_hair_length(attributes, table, classifiers)?;
    let attributes = clean_color_column(attributes, table, classifiers)?;

    let rows_in = attributes.height();
    let keep = most_informative_rows(&attributes)?;
    let indices: Vec<Option<usize>> = keep.into_iter().map(Some).collect();
    let columns: Vec<Column> = attributes
        .get_columns()
        .iter()
        .map(|column| gather_rows(column, column.name().as_str(), &indices))
        .collect();
    let attributes = DataFrame::new(columns)?;

    info!(
        table = %table,
        rows_in,
        animals = attributes.height(),
        duration_ms = start.elapsed().as_millis(),
        "animal attributes built"
    );
    Ok(attributes)
}

/// Row indices that survive the sort-by-age, keep-last-per-id rule, in sorted
/// order.
fn most_informative_rows(df: &DataFrame) -> Result<Vec<usize>> {
    let ids = text_values(df, ANIMAL_ID).unwrap_or_default();
    let ages: Vec<Option<f64>> = match df.column(AGE_YR) {
        Ok(column) => (0..df.height())
            .map(|idx| any_to_f64(column.get(idx).unwrap_or(AnyValue::Null)))
            .collect(),
        Err(_) => vec![None; df.height()],
    };

    let mut order: Vec<usize> = (0..df.height()).collect();
    order.sort_by(|&a, &b| compare_age(ages[a], ages[b]));

    let mut last_position: HashMap<Option<&str>, usize> = HashMap::with_capacity(order.len());
    for (position, &row) in order.iter().enumerate() {
        last_position.insert(ids[row].as_deref(), position);
    }
    let mut positions: Vec<usize> = last_position.into_values().collect();
    positions.sort_unstable();
    Ok(positions.into_iter().map(|position| order[position]).collect())
}

/// Missing ages sort first, then ascending.
fn compare_age(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.total_cmp(&b),
    }
}

/// Outer-joins intake and outcome attribute rows on `animal_id`.
///
/// Columns present on both sides get `_intake` / `_outcome` suffixes; the
/// rest keep their names. Rows are ordered by `animal_id`; rows without an id
/// cannot be joined and are dropped.
pub fn merge_animal_attributes(intake: &DataFrame, outcome: &DataFrame) -> Result<DataFrame> {
    let span = info_span!("merge_animal_attributes");
    let _guard = span.enter();
    require_identity(intake, TableKind::Intake, &[ANIMAL_ID])?;
    require_identity(outcome, TableKind::Outcome, &[ANIMAL_ID])?;

    let intake_rows = row_index(intake);
    let outcome_rows = row_index(outcome);
    let keys: BTreeSet<&str> = intake_rows
        .keys()
        .chain(outcome_rows.keys())
        .map(String::as_str)
        .collect();
    let dropped = intake.height() + outcome.height() - intake_rows.len() - outcome_rows.len();
    if dropped > 0 {
        warn!(dropped, "attribute rows without a usable animal_id not merged");
    }

    let intake_indices: Vec<Option<usize>> =
        keys.iter().map(|key| intake_rows.get(*key).copied()).collect();
    let outcome_indices: Vec<Option<usize>> =
        keys.iter().map(|key| outcome_rows.get(*key).copied()).collect();

    let intake_names = column_names(intake);
    let outcome_names = column_names(outcome);
    let mut columns: Vec<Column> = Vec::with_capacity(intake.width() + outcome.width());
    columns.push(text_column(
        ANIMAL_ID,
        keys.iter().map(|key| Some((*key).to_string())).collect(),
    ));
    for (df, indices, own_suffix, other_names) in [
        (intake, &intake_indices, INTAKE_SUFFIX, &outcome_names),
        (outcome, &outcome_indices, OUTCOME_SUFFIX, &intake_names),
    ] {
        for column in df.get_columns() {
            let name = column.name().as_str();
            if name == ANIMAL_ID {
                continue;
            }
            let merged_name = if other_names.iter().any(|other| other == name) {
                format!("{name}{own_suffix}")
            } else {
                name.to_string()
            };
            columns.push(gather_rows(column, &merged_name, indices));
        }
    }
    let merged = DataFrame::new(columns)?;
    debug!(
        animals = merged.height(),
        intake_only = outcome_indices.iter().filter(|idx| idx.is_none()).count(),
        outcome_only = intake_indices.iter().filter(|idx| idx.is_none()).count(),
        "animal attributes merged"
    );
    Ok(merged)
}

/// Map from `animal_id` to its row; the last row wins on repeats.
fn row_index(df: &DataFrame) -> HashMap<String, usize> {
    text_values(df, ANIMAL_ID)
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .filter_map(|(idx, id)| id.map(|id| (id, idx)))
        .collect()
}
