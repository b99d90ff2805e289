//! Shelter event transformation.
//!
//! This crate turns normalized raw intake and outcome events into the four
//! exported tables:
//!
//! - **datetime**: timestamp format detection, canonical timestamps, `line_id`
//!   and calendar/season/shift features
//! - **classify**: the first-match-wins classifier over the fixed taxonomies
//! - **age**: free-text age to years and lifecycle stage
//! - **attributes**: name, sex, breed, species and color normalization
//! - **events**: intake condition and outcome type/subtype classification
//! - **reconcile**: one attribute row per animal and the intake/outcome merge
//! - **los**: length of stay from paired events
//! - **finalize**: export column contracts
//! - **audit**: null, duplicate and vocabulary checks on built tables

pub mod age;
pub mod attributes;
pub mod audit;
pub mod classify;
pub mod datetime;
mod error;
pub mod events;
pub mod finalize;
pub mod frame;
pub mod los;
pub mod pipeline;
pub mod reconcile;

pub use audit::{TableAudit, audit_table, overlapping_columns};
pub use classify::{Classifier, Classifiers, TaxonomySummary, taxonomy_listing};
pub use error::{Result, TransformError};
pub use frame::EventFrame;
pub use pipeline::{
    FinalTables, build_animal_attributes, build_intake_table, build_length_of_stay_table,
    build_outcome_table, finalize_tables,
};
