//! The four tables a run produces.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Intake,
    Outcome,
    Animal,
    LengthOfStay,
}

impl TableKind {
    pub const ALL: [TableKind; 4] = [
        TableKind::Intake,
        TableKind::Outcome,
        TableKind::Animal,
        TableKind::LengthOfStay,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::Intake => "intake",
            TableKind::Outcome => "outcome",
            TableKind::Animal => "animal",
            TableKind::LengthOfStay => "length_of_stay",
        }
    }

    /// File name of the exported table.
    pub fn file_name(&self) -> &'static str {
        match self {
            TableKind::Intake => "intake_table.csv",
            TableKind::Outcome => "outcome_table.csv",
            TableKind::Animal => "animal_table.csv",
            TableKind::LengthOfStay => "length_of_stay_table.csv",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
