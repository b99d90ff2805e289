//! Shelter data model.
//!
//! Column names, the closed label sets of derived fields, and the fixed
//! taxonomy tables the classifier runs on. Nothing here touches a DataFrame.

pub mod columns;
pub mod table;
pub mod taxonomy;
pub mod vocab;

pub use table::TableKind;
pub use taxonomy::{MatchKind, Rule, Taxonomy};
pub use vocab::{LifecycleStage, Season, SexLabel, Shift, UNKNOWN};
