//! The staged run: load, build, audit, finalize and export.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span, warn};

use shelter_ingest::{load_event_table, normalize_raw_events};
use shelter_model::TableKind;
use shelter_output::export_tables;
use shelter_transform::{
    Classifiers, FinalTables, audit_table, build_animal_attributes, build_intake_table,
    build_length_of_stay_table, build_outcome_table, finalize_tables, overlapping_columns,
};

use crate::types::{RunConfig, RunResult, TableSummary};

/// Loads and normalizes one source table.
///
/// A file that cannot be read yields `None`; a readable file without the
/// identity columns is an error.
pub fn load_source(path: &Path, table: TableKind) -> Result<Option<DataFrame>> {
    let Some(raw) = load_event_table(path, table.as_str()) else {
        return Ok(None);
    };
    let df = normalize_raw_events(raw, table.as_str())
        .with_context(|| format!("normalize {}", path.display()))?;
    Ok(Some(df))
}

/// Runs every stage for one intake and one outcome export.
pub fn run_pipeline(config: &RunConfig) -> Result<RunResult> {
    let span = info_span!(
        "run",
        output_dir = %config.output_dir.display(),
        dry_run = config.dry_run
    );
    let _guard = span.enter();
    let start = Instant::now();
    let mut errors = Vec::new();

    // =========================================================================
    // Stage 1: Load and normalize the raw exports
    // =========================================================================
    let intake_raw = load_source(&config.intake, TableKind::Intake)?;
    let outcome_raw = load_source(&config.outcome, TableKind::Outcome)?;
    for (table, path, raw) in [
        (TableKind::Intake, &config.intake, &intake_raw),
        (TableKind::Outcome, &config.outcome, &outcome_raw),
    ] {
        if raw.is_none() {
            errors.push(format!("{table}: could not load {}", path.display()));
        }
    }

    // =========================================================================
    // Stage 2: Build the event tables and the derived tables
    // =========================================================================
    let classifiers = Classifiers::load().context("compile taxonomies")?;
    let intake = intake_raw
        .map(|df| build_intake_table(df, &classifiers))
        .transpose()
        .context("build intake table")?;
    let outcome = outcome_raw
        .map(|df| build_outcome_table(df, &classifiers))
        .transpose()
        .context("build outcome table")?;
    let merged = build_animal_attributes(intake.as_ref(), outcome.as_ref(), &classifiers)
        .context("build animal table")?;
    let stays = build_length_of_stay_table(intake.as_ref(), outcome.as_ref())
        .context("build length of stay table")?;

    // =========================================================================
    // Stage 3: Finalize export columns
    // =========================================================================
    let tables = finalize_tables(
        intake.as_ref(),
        outcome.as_ref(),
        merged.as_ref(),
        stays.as_ref(),
    )
    .context("finalize tables")?;
    for table in [TableKind::Animal, TableKind::LengthOfStay] {
        if tables.get(table).is_none() {
            errors.push(format!("{table}: skipped, a source table is unavailable"));
        }
    }
    log_overlaps(&tables);

    // =========================================================================
    // Stage 4: Export
    // =========================================================================
    let outputs = if config.dry_run {
        info!("dry run: no files written");
        Vec::new()
    } else {
        export_tables(&tables, &config.output_dir)
            .with_context(|| format!("export to {}", config.output_dir.display()))?
    };

    let summaries: Vec<TableSummary> = tables
        .frames()
        .into_iter()
        .enumerate()
        .map(|(idx, frame)| TableSummary {
            table: frame.table,
            records: frame.record_count(),
            columns: frame.column_count(),
            output: outputs.get(idx).cloned(),
            audit: audit_table(frame),
        })
        .collect();

    if !errors.is_empty() {
        warn!(errors = errors.len(), "run finished with errors");
    }
    info!(
        tables = summaries.len(),
        duration_ms = start.elapsed().as_millis(),
        "run complete"
    );
    Ok(RunResult {
        output_dir: config.output_dir.clone(),
        dry_run: config.dry_run,
        tables: summaries,
        has_errors: !errors.is_empty(),
        errors,
    })
}

fn log_overlaps(tables: &FinalTables) {
    let named: Vec<(&str, &DataFrame)> = tables
        .frames()
        .into_iter()
        .map(|frame| (frame.table.as_str(), &frame.data))
        .collect();
    for (pair, columns) in overlapping_columns(&named) {
        debug!(pair = %pair, columns = ?columns, "shared columns");
    }
}
