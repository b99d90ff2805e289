//! End-to-end table builds over small in-memory event tables.

use polars::prelude::DataFrame;
use shelter_common::{any_to_f64, column_names, text_column, text_values};
use shelter_model::TableKind;
use shelter_transform::reconcile::animal_attributes;
use shelter_transform::{
    Classifiers, FinalTables, build_animal_attributes, build_intake_table,
    build_length_of_stay_table, build_outcome_table, finalize_tables,
};

fn column(name: &str, values: &[Option<&str>]) -> polars::prelude::Column {
    text_column(name, values.iter().map(|v| v.map(str::to_string)).collect())
}

fn text(values: &[Option<&str>]) -> Option<Vec<Option<String>>> {
    Some(values.iter().map(|v| v.map(str::to_string)).collect())
}

/// Normalized intake events: two animals, one of them listed twice.
fn intake_events() -> DataFrame {
    DataFrame::new(vec![
        column("animal_id", &[Some("a1"), Some("a2"), Some("a2")]),
        column("name", &[Some("*max"), None, None]),
        column(
            "datetime",
            &[
                Some("01/01/2021 08:00:00 am"),
                Some("02/14/2021 04:30:00 pm"),
                Some("02/14/2021 04:30:00 pm"),
            ],
        ),
        column("intake_condition", &[Some("normal"), Some("nursing"), Some("nursing")]),
        column("animal_type", &[Some("dog"), Some("cat"), Some("cat")]),
        column(
            "sex_upon_intake",
            &[Some("intact male"), Some("spayed female"), Some("spayed female")],
        ),
        column("age_upon_intake", &[Some("3 years"), Some("10 months"), Some("10 months")]),
        column(
            "breed",
            &[
                Some("labrador retriever mix"),
                Some("domestic shorthair"),
                Some("domestic shorthair"),
            ],
        ),
        column("color", &[Some("brown tabby/white"), Some("black"), Some("black")]),
    ])
    .unwrap()
}

/// Normalized outcome events: one animal with an outcome before and after intake.
fn outcome_events() -> DataFrame {
    DataFrame::new(vec![
        column("animal_id", &[Some("a1"), Some("a1")]),
        column("name", &[Some("max"), Some("*max")]),
        column(
            "datetime",
            &[Some("2021-01-03 10:00:00"), Some("2020-12-30 09:00:00")],
        ),
        column("outcome_type", &[Some("adoption"), Some("transfer")]),
        column("outcome_subtype", &[None, Some("partner")]),
        column("animal_type", &[Some("dog"), Some("dog")]),
        column(
            "sex_upon_outcome",
            &[Some("neutered male"), Some("intact male")],
        ),
        column("age_upon_outcome", &[Some("3 years"), Some("2 years")]),
        column(
            "breed",
            &[Some("labrador retriever mix"), Some("labrador retriever mix")],
        ),
        column("color", &[Some("brown tabby/white"), Some("brown tabby/white")]),
    ])
    .unwrap()
}

fn run() -> FinalTables {
    let classifiers = Classifiers::load().unwrap();
    let intake = build_intake_table(intake_events(), &classifiers).unwrap();
    let outcome = build_outcome_table(outcome_events(), &classifiers).unwrap();
    let merged = build_animal_attributes(Some(&intake), Some(&outcome), &classifiers)
        .unwrap()
        .expect("both tables present");
    let stays = build_length_of_stay_table(Some(&intake), Some(&outcome))
        .unwrap()
        .expect("both tables present");
    finalize_tables(Some(&intake), Some(&outcome), Some(&merged), Some(&stays)).unwrap()
}

#[test]
fn intake_table_is_deduplicated_and_classified() {
    let tables = run();
    let intake = tables.intake.expect("intake table");
    assert_eq!(intake.record_count(), 2);

    let names = column_names(&intake.data);
    assert_eq!(&names[..3], &["line_id", "animal_id", "datetime"]);
    assert!(names.contains(&"season".to_string()));
    assert!(names.contains(&"pregnant_or_nursing".to_string()));

    assert_eq!(
        text_values(&intake.data, "line_id"),
        text(&[Some("a1_2021-01-01 08:00:00"), Some("a2_2021-02-14 16:30:00")])
    );
    assert_eq!(
        text_values(&intake.data, "intake_reason"),
        text(&[Some("routine"), Some("medical")])
    );
    assert_eq!(
        text_values(&intake.data, "shift"),
        text(&[Some("day"), Some("swing")])
    );
    assert_eq!(
        text_values(&intake.data, "weekday"),
        text(&[Some("friday"), Some("sunday")])
    );
}

#[test]
fn outcome_table_carries_categories() {
    let tables = run();
    let outcome = tables.outcome.expect("outcome table");
    assert_eq!(
        text_values(&outcome.data, "outcome_category"),
        text(&[Some("alive"), Some("admin")])
    );
    assert_eq!(
        text_values(&outcome.data, "outcome_subcategory"),
        text(&[Some("unknown"), Some("program")])
    );
}

#[test]
fn animal_dimension_picks_sides_per_attribute() {
    let tables = run();
    let animal = tables.animal.expect("animal table");
    assert_eq!(
        column_names(&animal.data),
        vec![
            "animal_id",
            "name",
            "species",
            "primary_breed",
            "secondary_breed",
            "akc_group",
            "hair_length",
            "color",
            "altered",
            "sex",
            "age_yr",
            "lifecycle_stage",
        ]
    );
    assert_eq!(text_values(&animal.data, "animal_id"), text(&[Some("a1"), Some("a2")]));

    // outcome-side species and group, intake-side breed
    assert_eq!(text_values(&animal.data, "species"), text(&[Some("dog"), None]));
    assert_eq!(
        text_values(&animal.data, "primary_breed"),
        text(&[Some("labrador retriever"), Some("domestic shorthair")])
    );
    assert_eq!(text_values(&animal.data, "secondary_breed"), text(&[None, None]));
    assert_eq!(text_values(&animal.data, "akc_group"), text(&[Some("sporting"), None]));

    // intake-side color, collapsed
    assert_eq!(
        text_values(&animal.data, "color"),
        text(&[Some("patterned"), Some("black")])
    );

    // Oldest known outcome row wins: neutered, three years
    assert_eq!(text_values(&animal.data, "altered"), text(&[Some("true"), None]));
    assert_eq!(text_values(&animal.data, "name"), text(&[Some("max"), None]));
    let age = animal.data.column("age_yr").unwrap();
    assert_eq!(any_to_f64(age.get(0).unwrap()), Some(3.0));
    assert_eq!(
        text_values(&animal.data, "lifecycle_stage"),
        text(&[Some("adult"), None])
    );
}

#[test]
fn length_of_stay_uses_earliest_feasible_outcome() {
    let tables = run();
    let stays = tables.length_of_stay.expect("length of stay table");
    assert_eq!(
        column_names(&stays.data),
        vec!["animal_id", "datetime_intake", "datetime_outcome", "length_of_stay_days"]
    );
    assert_eq!(stays.record_count(), 1);
    assert_eq!(
        text_values(&stays.data, "datetime_outcome"),
        text(&[Some("2021-01-03 10:00:00")])
    );
    assert_eq!(
        text_values(&stays.data, "length_of_stay_days"),
        text(&[Some("2")])
    );
}

#[test]
fn intake_attributes_cover_sex_and_age_scenarios() {
    let classifiers = Classifiers::load().unwrap();
    let intake = build_intake_table(intake_events(), &classifiers).unwrap();
    let attributes = animal_attributes(&intake.data, TableKind::Intake, &classifiers).unwrap();
    assert_eq!(attributes.height(), 2);

    let ids = text_values(&attributes, "animal_id").unwrap();
    let cat = ids.iter().position(|id| id.as_deref() == Some("a2")).unwrap();

    assert_eq!(
        text_values(&attributes, "altered").unwrap()[cat],
        Some("true".to_string())
    );
    assert_eq!(
        text_values(&attributes, "cln_sex").unwrap()[cat],
        Some("female".to_string())
    );
    let age = any_to_f64(attributes.column("age_yr").unwrap().get(cat).unwrap()).unwrap();
    assert!((age - 10.0 / 12.0).abs() < 1e-9);
    assert_eq!(
        text_values(&attributes, "lifecycle_stage").unwrap()[cat],
        Some("juvenile".to_string())
    );
    assert_eq!(
        text_values(&attributes, "cat_breed_group").unwrap()[cat],
        Some("dsh".to_string())
    );
    assert_eq!(
        text_values(&attributes, "cln_name").unwrap()[cat],
        Some("a2".to_string())
    );
    assert_eq!(
        text_values(&attributes, "name_given_at_intake").unwrap()[cat],
        Some("false".to_string())
    );
}

#[test]
fn absent_source_table_skips_dependent_tables() {
    let classifiers = Classifiers::load().unwrap();
    let intake = build_intake_table(intake_events(), &classifiers).unwrap();
    assert!(
        build_animal_attributes(Some(&intake), None, &classifiers)
            .unwrap()
            .is_none()
    );
    assert!(build_length_of_stay_table(None, Some(&intake)).unwrap().is_none());

    let tables = finalize_tables(Some(&intake), None, None, None).unwrap();
    assert_eq!(tables.frames().len(), 1);
    assert!(tables.get(TableKind::Intake).is_some());
    assert!(tables.get(TableKind::Outcome).is_none());
}

#[test]
fn missing_identity_is_an_error() {
    let classifiers = Classifiers::load().unwrap();
    let df = DataFrame::new(vec![column("animal_id", &[Some("a1")])]).unwrap();
    let err = build_outcome_table(df, &classifiers).unwrap_err();
    assert_eq!(
        err.to_string(),
        "outcome: required identity column 'datetime' not found"
    );
}
