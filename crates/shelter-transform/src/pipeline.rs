//! Table builders composing the stages.
//!
//! Every builder takes the tables it depends on as `Option`s: an absent input
//! yields an absent output, so a table that failed to load only removes the
//! tables built from it.

use polars::prelude::DataFrame;
use tracing::{info, info_span, warn};

use shelter_model::TableKind;

use crate::classify::Classifiers;
use crate::datetime::{add_calendar_features, parse_event_datetimes};
use crate::error::Result;
use crate::events::{classify_intake_condition, classify_outcome_subtype, classify_outcome_type};
use crate::finalize::{finalize_animal_table, finalize_event_table, finalize_los_table};
use crate::frame::EventFrame;
use crate::los::length_of_stay;
use crate::reconcile::{animal_attributes, merge_animal_attributes};

/// Classified intake table from normalized raw intake events.
pub fn build_intake_table(df: DataFrame, classifiers: &Classifiers) -> Result<EventFrame> {
    let table = TableKind::Intake;
    let span = info_span!("build_table", table = %table);
    let _guard = span.enter();
    let df = parse_event_datetimes(df, table)?;
    let df = add_calendar_features(df, table)?;
    let df = classify_intake_condition(df, table, classifiers)?;
    Ok(EventFrame::new(table, df))
}

/// Classified outcome table from normalized raw outcome events.
pub fn build_outcome_table(df: DataFrame, classifiers: &Classifiers) -> Result<EventFrame> {
    let table = TableKind::Outcome;
    let span = info_span!("build_table", table = %table);
    let _guard = span.enter();
    let df = parse_event_datetimes(df, table)?;
    let df = add_calendar_features(df, table)?;
    let df = classify_outcome_type(df, table, classifiers)?;
    let df = classify_outcome_subtype(df, table, classifiers)?;
    Ok(EventFrame::new(table, df))
}

/// Merged per-animal attributes, before export column selection.
pub fn build_animal_attributes(
    intake: Option<&EventFrame>,
    outcome: Option<&EventFrame>,
    classifiers: &Classifiers,
) -> Result<Option<DataFrame>> {
    let (Some(intake), Some(outcome)) = (intake, outcome) else {
        warn!("animal table skipped: intake or outcome table unavailable");
        return Ok(None);
    };
    let intake_attributes = animal_attributes(&intake.data, intake.table, classifiers)?;
    let outcome_attributes = animal_attributes(&outcome.data, outcome.table, classifiers)?;
    let merged = merge_animal_attributes(&intake_attributes, &outcome_attributes)?;
    Ok(Some(merged))
}

/// Length-of-stay table, before export column selection.
pub fn build_length_of_stay_table(
    intake: Option<&EventFrame>,
    outcome: Option<&EventFrame>,
) -> Result<Option<EventFrame>> {
    let (Some(intake), Some(outcome)) = (intake, outcome) else {
        warn!("length of stay table skipped: intake or outcome table unavailable");
        return Ok(None);
    };
    let df = length_of_stay(&intake.data, &outcome.data)?;
    Ok(Some(EventFrame::new(TableKind::LengthOfStay, df)))
}

/// The four tables of a run, as exported.
#[derive(Debug, Clone, Default)]
pub struct FinalTables {
    pub intake: Option<EventFrame>,
    pub outcome: Option<EventFrame>,
    pub animal: Option<EventFrame>,
    pub length_of_stay: Option<EventFrame>,
}

impl FinalTables {
    /// Present tables in export order.
    pub fn frames(&self) -> Vec<&EventFrame> {
        [
            self.intake.as_ref(),
            self.outcome.as_ref(),
            self.animal.as_ref(),
            self.length_of_stay.as_ref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn get(&self, table: TableKind) -> Option<&EventFrame> {
        match table {
            TableKind::Intake => self.intake.as_ref(),
            TableKind::Outcome => self.outcome.as_ref(),
            TableKind::Animal => self.animal.as_ref(),
            TableKind::LengthOfStay => self.length_of_stay.as_ref(),
        }
    }
}

/// Applies the export column contracts to the built tables.
pub fn finalize_tables(
    intake: Option<&EventFrame>,
    outcome: Option<&EventFrame>,
    merged_attributes: Option<&DataFrame>,
    stays: Option<&EventFrame>,
) -> Result<FinalTables> {
    let span = info_span!("finalize_tables");
    let _guard = span.enter();
    let event = |frame: Option<&EventFrame>| -> Result<Option<EventFrame>> {
        frame
            .map(|f| finalize_event_table(&f.data).map(|data| EventFrame::new(f.table, data)))
            .transpose()
    };
    let tables = FinalTables {
        intake: event(intake)?,
        outcome: event(outcome)?,
        animal: merged_attributes
            .map(|df| {
                finalize_animal_table(df).map(|data| EventFrame::new(TableKind::Animal, data))
            })
            .transpose()?,
        length_of_stay: stays
            .map(|f| finalize_los_table(&f.data).map(|data| EventFrame::new(f.table, data)))
            .transpose()?,
    };
    info!(tables = tables.frames().len(), "tables finalized");
    Ok(tables)
}
