//! Shelter event ingestion.
//!
//! - **reader**: load a delimited event file into a string-typed DataFrame
//! - **normalize**: canonical column names, exact-duplicate removal, text cleanup

pub mod error;
pub mod normalize;
pub mod reader;

pub use error::{IngestError, Result};
pub use normalize::{canonical_column_name, normalize_raw_events};
pub use reader::{load_event_table, read_event_csv};
