//! Length of stay from paired intake and outcome events.

use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

use chrono::NaiveDateTime;
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span};

use shelter_common::{i64_column, text_column, text_values};
use shelter_model::TableKind;
use shelter_model::columns::{
    ANIMAL_ID, DATETIME, DATETIME_INTAKE, DATETIME_OUTCOME, LENGTH_OF_STAY_DAYS,
};

use crate::datetime::{CANONICAL_FORMAT, parse_canonical};
use crate::error::Result;
use crate::frame::require_identity;

/// One intake paired with its earliest feasible outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StayRecord {
    pub animal_id: String,
    pub intake: NaiveDateTime,
    pub outcome: NaiveDateTime,
}

impl StayRecord {
    /// Whole days between intake and outcome.
    pub fn days(&self) -> i64 {
        (self.outcome - self.intake).num_days()
    }
}

/// Pairs every intake with the earliest outcome of the same animal at or after
/// it.
///
/// Intakes with no such outcome produce no record, and repeated
/// (`animal_id`, intake) pairs produce one. Records come back ordered by
/// `animal_id` then intake time.
pub fn pair_stays(
    intakes: &[(Option<String>, Option<NaiveDateTime>)],
    outcomes: &[(Option<String>, Option<NaiveDateTime>)],
) -> Vec<StayRecord> {
    let mut outcomes_by_animal: HashMap<&str, Vec<NaiveDateTime>> = HashMap::new();
    for (id, at) in outcomes {
        if let (Some(id), Some(at)) = (id, at) {
            outcomes_by_animal.entry(id.as_str()).or_default().push(*at);
        }
    }
    for times in outcomes_by_animal.values_mut() {
        times.sort_unstable();
    }

    let mut stays: BTreeMap<(&str, NaiveDateTime), NaiveDateTime> = BTreeMap::new();
    for (id, at) in intakes {
        let (Some(id), Some(intake)) = (id, at) else {
            continue;
        };
        let Some(times) = outcomes_by_animal.get(id.as_str()) else {
            continue;
        };
        let first_feasible = times.partition_point(|outcome| outcome < intake);
        if let Some(outcome) = times.get(first_feasible) {
            stays.entry((id.as_str(), *intake)).or_insert(*outcome);
        }
    }

    stays
        .into_iter()
        .map(|((animal_id, intake), outcome)| StayRecord {
            animal_id: animal_id.to_string(),
            intake,
            outcome,
        })
        .collect()
}

/// Builds the length-of-stay table from the cleaned intake and outcome tables.
pub fn length_of_stay(intake: &DataFrame, outcome: &DataFrame) -> Result<DataFrame> {
    let span = info_span!("length_of_stay");
    let _guard = span.enter();
    let start = Instant::now();
    require_identity(intake, TableKind::Intake, &[ANIMAL_ID, DATETIME])?;
    require_identity(outcome, TableKind::Outcome, &[ANIMAL_ID, DATETIME])?;

    let intakes = events(intake);
    let outcomes = events(outcome);
    let stays = pair_stays(&intakes, &outcomes);
    debug!(
        intakes = intakes.len(),
        unmatched = intakes.len() - stays.len(),
        "intakes paired with outcomes"
    );

    let format = |at: &NaiveDateTime| Some(at.format(CANONICAL_FORMAT).to_string());
    let df = DataFrame::new(vec![
        text_column(
            ANIMAL_ID,
            stays.iter().map(|s| Some(s.animal_id.clone())).collect(),
        ),
        text_column(DATETIME_INTAKE, stays.iter().map(|s| format(&s.intake)).collect()),
        text_column(DATETIME_OUTCOME, stays.iter().map(|s| format(&s.outcome)).collect()),
        i64_column(LENGTH_OF_STAY_DAYS, stays.iter().map(|s| Some(s.days())).collect()),
    ])?;

    info!(
        stays = df.height(),
        duration_ms = start.elapsed().as_millis(),
        "length of stay computed"
    );
    Ok(df)
}

fn events(df: &DataFrame) -> Vec<(Option<String>, Option<NaiveDateTime>)> {
    let ids = text_values(df, ANIMAL_ID).unwrap_or_default();
    let times = text_values(df, DATETIME).unwrap_or_default();
    ids.into_iter()
        .zip(times)
        .map(|(id, at)| (id, at.as_deref().and_then(parse_canonical)))
        .collect()
}
