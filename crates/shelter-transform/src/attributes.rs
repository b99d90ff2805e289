//! Per-animal attribute normalization.
//!
//! Row-level rules are plain functions over optional text. The column stages
//! wrap them: each reads its source column, appends the derived columns and
//! drops the source. A stage whose source column is missing logs a warning and
//! hands its input back unchanged.

use polars::prelude::DataFrame;
use tracing::{debug, warn};

use shelter_common::{
    bool_column, column_names, f64_column, has_column, text_column, text_values, without_columns,
};
use shelter_model::columns::{
    AGE_YR, AKC_GROUP, ALTERED, ANIMAL_ID, ANIMAL_TYPE, BREED, CAT_BREED_GROUP, CLN_COLOR,
    CLN_NAME, CLN_SEX, CLN_SPP, COLOR, HAIR_LENGTH, LIFECYCLE_STAGE, NAME, NAME_GIVEN_AT_INTAKE,
    PRIMARY_BREED, SECONDARY_BREED, SECONDARY_COLOR,
};
use shelter_model::taxonomy::{CAT_SPECIES, DOG_SPECIES, INVALID_COLORS, OTHER_SPECIES};
use shelter_model::{SexLabel, TableKind, UNKNOWN};

use crate::age::{lifecycle_stage, parse_age_years};
use crate::classify::{Classifier, Classifiers};
use crate::error::Result;

/// Marks a name the shelter assigned at intake.
pub const ASSIGNED_NAME_MARKER: char = '*';

/// Sterilization prefixes of the combined sex field.
pub const ALTERED_PREFIXES: [&str; 2] = ["neutered", "spayed"];

/// Column prefixes folded onto the age and sex fields.
pub const AGE_PREFIX: &str = "age";
pub const SEX_PREFIX: &str = "sex";

// ============================================================================
// Row rules
// ============================================================================

/// Name with the assigned-name marker stripped, plus whether it was present.
///
/// An empty or missing name falls back to the animal id.
pub fn clean_name(raw: Option<&str>, animal_id: Option<&str>) -> (bool, Option<String>) {
    let given_at_intake =
        raw.is_some_and(|name| name.trim_start().starts_with(ASSIGNED_NAME_MARKER));
    let cleaned = raw
        .map(|name| name.trim().trim_start_matches(ASSIGNED_NAME_MARKER).trim())
        .filter(|name| !name.is_empty())
        .or(animal_id)
        .map(str::to_string);
    (given_at_intake, cleaned)
}

/// Sterilization flag and gender of a combined sex value.
///
/// `"fe"` is checked before `"male"` since every female value also contains
/// `"male"`.
pub fn clean_sex(raw: Option<&str>) -> (bool, SexLabel) {
    let value = raw.map(str::to_lowercase).unwrap_or_else(|| UNKNOWN.to_string());
    let value = value.trim();
    let altered = ALTERED_PREFIXES
        .iter()
        .any(|prefix| value.starts_with(prefix));
    let sex = if value.contains("fe") {
        SexLabel::Female
    } else if value.contains("male") {
        SexLabel::Male
    } else {
        SexLabel::Unknown
    };
    (altered, sex)
}

/// Splits a breed into primary and secondary parts.
///
/// A `/` splits once; otherwise a trailing `" mix"` is removed and there is no
/// secondary breed.
///
/// # Examples
///
/// ```
/// use shelter_transform::attributes::split_breed;
///
/// assert_eq!(
///     split_breed(Some("Labrador Retriever Mix")),
///     (Some("labrador retriever".to_string()), None)
/// );
/// assert_eq!(
///     split_breed(Some("Beagle/Pointer")),
///     (Some("beagle".to_string()), Some("pointer".to_string()))
/// );
/// ```
pub fn split_breed(raw: Option<&str>) -> (Option<String>, Option<String>) {
    let Some(raw) = raw else {
        return (None, None);
    };
    let raw = raw.to_lowercase();
    match raw.split_once('/') {
        Some((primary, secondary)) => (non_blank(primary), non_blank(secondary)),
        None => {
            let primary = raw.split(" mix").next().unwrap_or_default();
            (non_blank(primary), None)
        }
    }
}

/// Splits a color once on `/` into primary and secondary parts.
pub fn split_color(raw: Option<&str>) -> (Option<String>, Option<String>) {
    let Some(raw) = raw else {
        return (None, None);
    };
    let raw = raw.to_lowercase();
    match raw.split_once('/') {
        Some((primary, secondary)) => (non_blank(primary), non_blank(secondary)),
        None => (non_blank(&raw), None),
    }
}

/// Invalid colors become `"unknown"`, patterned ones `"patterned"`.
pub fn collapse_color(primary: Option<String>, pattern: &Classifier) -> Option<String> {
    let primary = primary?;
    if INVALID_COLORS.contains(&primary.as_str()) {
        return Some(UNKNOWN.to_string());
    }
    match pattern.first_match(Some(&primary)) {
        Some(label) => Some(label.to_string()),
        None => Some(primary),
    }
}

/// Species label, refined by breed for the catch-all `"other"` species.
pub fn clean_species(
    animal_type: Option<&str>,
    primary_breed: Option<&str>,
    other_species: &Classifier,
) -> Option<String> {
    let species = animal_type.and_then(shelter_common::normalize_text)?;
    if species == OTHER_SPECIES {
        other_species.classify(primary_breed).map(str::to_string)
    } else {
        Some(species)
    }
}

/// AKC group of a dog's primary breed; non-dogs are `"unknown"`.
pub fn akc_group(
    species: Option<&str>,
    primary_breed: Option<&str>,
    akc: &Classifier,
) -> Option<&'static str> {
    if species.is_some_and(|s| s.contains(DOG_SPECIES)) {
        akc.classify(primary_breed)
    } else {
        Some(UNKNOWN)
    }
}

/// Coat-length group of a cat; null for other species and unmatched breeds.
pub fn cat_breed_group(
    species: Option<&str>,
    primary_breed: Option<&str>,
    coat: &Classifier,
) -> Option<&'static str> {
    if species != Some(CAT_SPECIES) {
        return None;
    }
    coat.first_match(primary_breed)
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ============================================================================
// Column stages
// ============================================================================

fn source_present(df: &DataFrame, table: TableKind, stage: &str, column: &str) -> bool {
    let present = has_column(df, column);
    if !present {
        warn!(table = %table, stage, column, "column not found; stage skipped");
    }
    present
}

/// First column whose name starts with `prefix`.
fn aliased_column(df: &DataFrame, prefix: &str) -> Option<String> {
    column_names(df)
        .into_iter()
        .find(|name| name.starts_with(prefix))
}

/// `name` → `name_given_at_intake`, `cln_name`.
pub fn clean_name_column(df: DataFrame, table: TableKind) -> Result<DataFrame> {
    if !source_present(&df, table, "clean_name", NAME) {
        return Ok(df);
    }
    let names = text_values(&df, NAME).unwrap_or_default();
    let ids = text_values(&df, ANIMAL_ID).unwrap_or_else(|| vec![None; df.height()]);
    let (given, cleaned): (Vec<bool>, Vec<Option<String>>) = names
        .iter()
        .zip(&ids)
        .map(|(name, id)| clean_name(name.as_deref(), id.as_deref()))
        .unzip();

    let mut df = without_columns(&df, &[NAME])?;
    df.with_column(bool_column(NAME_GIVEN_AT_INTAKE, given))?;
    df.with_column(text_column(CLN_NAME, cleaned))?;
    Ok(df)
}

/// `age*` → `age_yr`, `lifecycle_stage`.
pub fn clean_age_column(df: DataFrame, table: TableKind) -> Result<DataFrame> {
    let Some(source) = aliased_column(&df, AGE_PREFIX) else {
        warn!(
            table = %table,
            stage = "clean_age",
            column = AGE_PREFIX,
            "column not found; stage skipped"
        );
        return Ok(df);
    };
    let ages: Vec<Option<f64>> = text_values(&df, &source)
        .unwrap_or_default()
        .iter()
        .map(|age| age.as_deref().and_then(parse_age_years))
        .collect();
    let stages: Vec<Option<String>> = ages
        .iter()
        .map(|age| Some(lifecycle_stage(*age).to_string()))
        .collect();
    let missing = ages.iter().filter(|age| age.is_none()).count();
    debug!(table = %table, source = %source, missing, "ages parsed");

    let mut df = without_columns(&df, &[source.as_str()])?;
    df.with_column(f64_column(AGE_YR, ages))?;
    df.with_column(text_column(LIFECYCLE_STAGE, stages))?;
    Ok(df)
}

/// `sex*` → `altered`, `cln_sex`.
pub fn clean_sex_column(df: DataFrame, table: TableKind) -> Result<DataFrame> {
    let Some(source) = aliased_column(&df, SEX_PREFIX) else {
        warn!(
            table = %table,
            stage = "clean_sex",
            column = SEX_PREFIX,
            "column not found; stage skipped"
        );
        return Ok(df);
    };
    let (altered, sex): (Vec<bool>, Vec<Option<String>>) = text_values(&df, &source)
        .unwrap_or_default()
        .iter()
        .map(|raw| {
            let (altered, sex) = clean_sex(raw.as_deref());
            (altered, Some(sex.to_string()))
        })
        .unzip();

    let mut df = without_columns(&df, &[source.as_str()])?;
    df.with_column(bool_column(ALTERED, altered))?;
    df.with_column(text_column(CLN_SEX, sex))?;
    Ok(df)
}

/// `breed` → `primary_breed`, `secondary_breed`.
pub fn clean_breed_column(df: DataFrame, table: TableKind) -> Result<DataFrame> {
    if !source_present(&df, table, "clean_breed", BREED) {
        return Ok(df);
    }
    let (primary, secondary): (Vec<Option<String>>, Vec<Option<String>>) =
        text_values(&df, BREED)
            .unwrap_or_default()
            .iter()
            .map(|raw| split_breed(raw.as_deref()))
            .unzip();

    let mut df = without_columns(&df, &[BREED])?;
    df.with_column(text_column(PRIMARY_BREED, primary))?;
    df.with_column(text_column(SECONDARY_BREED, secondary))?;
    Ok(df)
}

/// `animal_type` → `cln_spp`; needs `primary_breed` for the `"other"` lookup.
pub fn clean_species_column(
    df: DataFrame,
    table: TableKind,
    classifiers: &Classifiers,
) -> Result<DataFrame> {
    if !source_present(&df, table, "clean_species", ANIMAL_TYPE)
        || !source_present(&df, table, "clean_species", PRIMARY_BREED)
    {
        return Ok(df);
    }
    let animal_types = text_values(&df, ANIMAL_TYPE).unwrap_or_default();
    let breeds = text_values(&df, PRIMARY_BREED).unwrap_or_default();
    let species: Vec<Option<String>> = animal_types
        .iter()
        .zip(&breeds)
        .map(|(animal_type, breed)| {
            clean_species(
                animal_type.as_deref(),
                breed.as_deref(),
                &classifiers.other_species,
            )
        })
        .collect();

    let mut df = without_columns(&df, &[ANIMAL_TYPE])?;
    df.with_column(text_column(CLN_SPP, species))?;
    Ok(df)
}

/// Adds `akc_group` from `cln_spp` and `primary_breed`.
pub fn add_akc_group(
    df: DataFrame,
    table: TableKind,
    classifiers: &Classifiers,
) -> Result<DataFrame> {
    species_breed_stage(df, table, "akc_group", AKC_GROUP, |species, breed| {
        akc_group(species, breed, &classifiers.akc_group).map(str::to_string)
    })
}

/// Adds `cat_breed_group` from `cln_spp` and `primary_breed`.
pub fn add_cat_breed_group(
    df: DataFrame,
    table: TableKind,
    classifiers: &Classifiers,
) -> Result<DataFrame> {
    species_breed_stage(df, table, "cat_breed_group", CAT_BREED_GROUP, |species, breed| {
        cat_breed_group(species, breed, &classifiers.cat_coat_length).map(str::to_string)
    })
}

fn species_breed_stage<F>(
    df: DataFrame,
    table: TableKind,
    stage: &str,
    target: &str,
    rule: F,
) -> Result<DataFrame>
where
    F: Fn(Option<&str>, Option<&str>) -> Option<String>,
{
    if !source_present(&df, table, stage, CLN_SPP)
        || !source_present(&df, table, stage, PRIMARY_BREED)
    {
        return Ok(df);
    }
    let species = text_values(&df, CLN_SPP).unwrap_or_default();
    let breeds = text_values(&df, PRIMARY_BREED).unwrap_or_default();
    let values: Vec<Option<String>> = species
        .iter()
        .zip(&breeds)
        .map(|(s, b)| rule(s.as_deref(), b.as_deref()))
        .collect();
    let mut df = df;
    df.with_column(text_column(target, values))?;
    Ok(df)
}

/// Adds `hair_length` from `primary_breed`, for every species.
pub fn add_hair_length(
    df: DataFrame,
    table: TableKind,
    classifiers: &Classifiers,
) -> Result<DataFrame> {
    if !source_present(&df, table, "hair_length", PRIMARY_BREED) {
        return Ok(df);
    }
    let values: Vec<Option<String>> = text_values(&df, PRIMARY_BREED)
        .unwrap_or_default()
        .iter()
        .map(|breed| {
            classifiers
                .hair_length
                .classify(breed.as_deref())
                .map(str::to_string)
        })
        .collect();
    let mut df = df;
    df.with_column(text_column(HAIR_LENGTH, values))?;
    Ok(df)
}

/// `color` → `cln_color` (collapsed), `secondary_color`.
pub fn clean_color_column(
    df: DataFrame,
    table: TableKind,
    classifiers: &Classifiers,
) -> Result<DataFrame> {
    if !source_present(&df, table, "clean_color", COLOR) {
        return Ok(df);
    }
    let (primary, secondary): (Vec<Option<String>>, Vec<Option<String>>) =
        text_values(&df, COLOR)
            .unwrap_or_default()
            .iter()
            .map(|raw| {
                let (primary, secondary) = split_color(raw.as_deref());
                (collapse_color(primary, &classifiers.color_pattern), secondary)
            })
            .unzip();

    let mut df = without_columns(&df, &[COLOR])?;
    df.with_column(text_column(CLN_COLOR, primary))?;
    df.with_column(text_column(SECONDARY_COLOR, secondary))?;
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifiers() -> Classifiers {
        Classifiers::load().unwrap()
    }

    #[test]
    fn name_marker_is_stripped_and_flagged() {
        assert_eq!(
            clean_name(Some("*max"), Some("a1")),
            (true, Some("max".to_string()))
        );
        assert_eq!(
            clean_name(Some("bella"), Some("a1")),
            (false, Some("bella".to_string()))
        );
        assert_eq!(clean_name(Some("*"), Some("a1")), (true, Some("a1".to_string())));
        assert_eq!(clean_name(None, Some("a2")), (false, Some("a2".to_string())));
    }

    #[test]
    fn sex_splits_sterilization_and_gender() {
        assert_eq!(clean_sex(Some("Spayed Female")), (true, SexLabel::Female));
        assert_eq!(clean_sex(Some("neutered male")), (true, SexLabel::Male));
        assert_eq!(clean_sex(Some("intact female")), (false, SexLabel::Female));
        assert_eq!(clean_sex(Some("intact male")), (false, SexLabel::Male));
        assert_eq!(clean_sex(Some("unknown")), (false, SexLabel::Unknown));
        assert_eq!(clean_sex(None), (false, SexLabel::Unknown));
    }

    #[test]
    fn breed_split_on_slash_or_mix() {
        assert_eq!(
            split_breed(Some("Pit Bull Mix")),
            (Some("pit bull".to_string()), None)
        );
        assert_eq!(
            split_breed(Some("chihuahua shorthair/dachshund mix")),
            (
                Some("chihuahua shorthair".to_string()),
                Some("dachshund mix".to_string())
            )
        );
        assert_eq!(split_breed(Some("beagle")), (Some("beagle".to_string()), None));
        assert_eq!(split_breed(None), (None, None));
    }

    #[test]
    fn color_split_and_collapse() {
        let c = classifiers();
        let (primary, secondary) = split_color(Some("Brown Tabby/White"));
        assert_eq!(secondary, Some("white".to_string()));
        assert_eq!(
            collapse_color(primary, &c.color_pattern),
            Some("patterned".to_string())
        );
        assert_eq!(
            collapse_color(Some("pink".to_string()), &c.color_pattern),
            Some("unknown".to_string())
        );
        assert_eq!(
            collapse_color(Some("black".to_string()), &c.color_pattern),
            Some("black".to_string())
        );
    }

    #[test]
    fn other_species_refined_by_breed() {
        let c = classifiers();
        assert_eq!(
            clean_species(Some("Other"), Some("rabbit sh"), &c.other_species),
            Some("rabbit".to_string())
        );
        assert_eq!(
            clean_species(Some("other"), Some("unicorn"), &c.other_species),
            Some("unknown".to_string())
        );
        assert_eq!(
            clean_species(Some("Dog"), Some("beagle"), &c.other_species),
            Some("dog".to_string())
        );
    }

    #[test]
    fn akc_group_only_for_dogs() {
        let c = classifiers();
        assert_eq!(
            akc_group(Some("dog"), Some("labrador retriever"), &c.akc_group),
            Some("sporting")
        );
        assert_eq!(
            akc_group(Some("dog"), Some("mutt"), &c.akc_group),
            Some("unknown")
        );
        assert_eq!(
            akc_group(Some("cat"), Some("beagle"), &c.akc_group),
            Some("unknown")
        );
    }

    #[test]
    fn cat_group_is_null_when_unreliable() {
        let c = classifiers();
        assert_eq!(
            cat_breed_group(Some("cat"), Some("domestic shorthair"), &c.cat_coat_length),
            Some("dsh")
        );
        assert_eq!(
            cat_breed_group(Some("cat"), Some("siamese"), &c.cat_coat_length),
            None
        );
        assert_eq!(cat_breed_group(Some("cat"), None, &c.cat_coat_length), None);
        assert_eq!(
            cat_breed_group(Some("dog"), Some("domestic shorthair"), &c.cat_coat_length),
            None
        );
    }

    #[test]
    fn age_stage_folds_aliased_column() {
        let df = DataFrame::new(vec![
            text_column(ANIMAL_ID, vec![Some("a1".to_string())]),
            text_column("age_upon_intake", vec![Some("3 years".to_string())]),
        ])
        .unwrap();
        let df = clean_age_column(df, TableKind::Intake).unwrap();
        assert_eq!(column_names(&df), vec![ANIMAL_ID, AGE_YR, LIFECYCLE_STAGE]);
        assert_eq!(
            text_values(&df, LIFECYCLE_STAGE),
            Some(vec![Some("adult".to_string())])
        );
    }

    #[test]
    fn stage_without_source_returns_input() {
        let df = DataFrame::new(vec![text_column(ANIMAL_ID, vec![Some("a1".to_string())])])
            .unwrap();
        let out = clean_color_column(df.clone(), TableKind::Outcome, &classifiers()).unwrap();
        assert!(out.equals_missing(&df));
        let out = clean_sex_column(df.clone(), TableKind::Outcome).unwrap();
        assert!(out.equals_missing(&df));
    }
}
