//! Canonical column names.
//!
//! Raw headers are folded to lower snake case on load, so every name here is
//! the post-normalization spelling.

pub const ANIMAL_ID: &str = "animal_id";
pub const DATETIME: &str = "datetime";
pub const LINE_ID: &str = "line_id";
pub const NAME: &str = "name";
pub const ANIMAL_TYPE: &str = "animal_type";
pub const BREED: &str = "breed";
pub const COLOR: &str = "color";
pub const SEX: &str = "sex";
pub const AGE: &str = "age";

pub const INTAKE_CONDITION: &str = "intake_condition";
pub const OUTCOME_TYPE: &str = "outcome_type";
pub const OUTCOME_SUBTYPE: &str = "outcome_subtype";

// Calendar features
pub const YEAR: &str = "year";
pub const MONTH: &str = "month";
pub const DAY: &str = "day";
pub const HOUR: &str = "hour";
pub const MINUTE: &str = "minute";
pub const WEEK: &str = "week";
pub const ISO_YEAR: &str = "iso_year";
pub const DAY_OF_WEEK: &str = "day_of_week";
pub const WEEKDAY: &str = "weekday";
pub const IS_WEEKEND: &str = "is_weekend";
pub const QUARTER: &str = "quarter";
pub const YEAR_QUARTER: &str = "year_quarter";
pub const SEASON: &str = "season";
pub const SHIFT: &str = "shift";

// Event classification
pub const PREGNANT_OR_NURSING: &str = "pregnant_or_nursing";
pub const INTAKE_REASON: &str = "intake_reason";
pub const OUTCOME_CATEGORY: &str = "outcome_category";
pub const OUTCOME_SUBCATEGORY: &str = "outcome_subcategory";

// Per-animal attributes
pub const NAME_GIVEN_AT_INTAKE: &str = "name_given_at_intake";
pub const CLN_NAME: &str = "cln_name";
pub const AGE_YR: &str = "age_yr";
pub const LIFECYCLE_STAGE: &str = "lifecycle_stage";
pub const ALTERED: &str = "altered";
pub const CLN_SEX: &str = "cln_sex";
pub const PRIMARY_BREED: &str = "primary_breed";
pub const SECONDARY_BREED: &str = "secondary_breed";
pub const CLN_SPP: &str = "cln_spp";
pub const AKC_GROUP: &str = "akc_group";
pub const CAT_BREED_GROUP: &str = "cat_breed_group";
pub const HAIR_LENGTH: &str = "hair_length";
pub const CLN_COLOR: &str = "cln_color";
pub const SECONDARY_COLOR: &str = "secondary_color";

// Length of stay
pub const DATETIME_INTAKE: &str = "datetime_intake";
pub const DATETIME_OUTCOME: &str = "datetime_outcome";
pub const LENGTH_OF_STAY_DAYS: &str = "length_of_stay_days";

/// Suffix appended to intake-side columns after the attribute merge.
pub const INTAKE_SUFFIX: &str = "_intake";
/// Suffix appended to outcome-side columns after the attribute merge.
pub const OUTCOME_SUFFIX: &str = "_outcome";

/// Columns that lead every exported event table.
pub const EVENT_LEADING_COLUMNS: [&str; 3] = [LINE_ID, ANIMAL_ID, DATETIME];

/// Prefixes of columns that only exist to build the animal dimension.
pub const DIMENSION_ONLY_PREFIXES: [&str; 7] = [
    "cln_",
    PRIMARY_BREED,
    SECONDARY_BREED,
    "akc_",
    HAIR_LENGTH,
    AGE_YR,
    "lifecycle",
];

/// Animal dimension export: (merged source column, exported name).
pub const ANIMAL_DIMENSION_COLUMNS: [(&str, &str); 12] = [
    (ANIMAL_ID, ANIMAL_ID),
    ("cln_name_outcome", NAME),
    ("cln_spp_outcome", "species"),
    ("primary_breed_intake", PRIMARY_BREED),
    ("secondary_breed_intake", SECONDARY_BREED),
    ("akc_group_outcome", AKC_GROUP),
    ("hair_length_outcome", HAIR_LENGTH),
    ("cln_color_intake", COLOR),
    ("altered_outcome", ALTERED),
    ("cln_sex_outcome", SEX),
    ("age_yr_outcome", AGE_YR),
    ("lifecycle_stage_outcome", LIFECYCLE_STAGE),
];

/// Length-of-stay export order.
pub const LENGTH_OF_STAY_COLUMNS: [&str; 4] = [
    ANIMAL_ID,
    DATETIME_INTAKE,
    DATETIME_OUTCOME,
    LENGTH_OF_STAY_DAYS,
];
