//! Export of final tables to a directory.

use polars::prelude::DataFrame;
use shelter_common::{i64_column, text_column};
use shelter_model::TableKind;
use shelter_output::{OutputError, export_tables, write_table};
use shelter_transform::{EventFrame, FinalTables};
use tempfile::TempDir;

fn stays() -> EventFrame {
    let df = DataFrame::new(vec![
        text_column("animal_id", vec![Some("a1".to_string()), Some("a2".to_string())]),
        text_column(
            "datetime_intake",
            vec![Some("2021-01-01 08:00:00".to_string()), None],
        ),
        i64_column("length_of_stay_days", vec![Some(2), Some(0)]),
    ])
    .unwrap();
    EventFrame::new(TableKind::LengthOfStay, df)
}

#[test]
fn writes_header_and_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stays.csv");
    write_table(&stays(), &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec![
            "animal_id,datetime_intake,length_of_stay_days",
            "a1,2021-01-01 08:00:00,2",
            "a2,,0",
        ]
    );
}

#[test]
fn exports_only_present_tables_into_a_new_directory() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("nested").join("output");
    let tables = FinalTables {
        length_of_stay: Some(stays()),
        ..FinalTables::default()
    };

    let written = export_tables(&tables, &out).unwrap();
    assert_eq!(written, vec![out.join("length_of_stay_table.csv")]);
    assert!(written[0].exists());
    assert!(!out.join("intake_table.csv").exists());
}

#[test]
fn unwritable_directory_is_reported() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, "not a directory").unwrap();

    let tables = FinalTables {
        length_of_stay: Some(stays()),
        ..FinalTables::default()
    };
    let err = export_tables(&tables, &blocker.join("output")).unwrap_err();
    assert!(matches!(err, OutputError::CreateDir { .. }));
}
