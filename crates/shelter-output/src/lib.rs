//! Shelter table export.
//!
//! Every final table is written as a comma-delimited file with a header row,
//! named after its table kind (`intake_table.csv`, `animal_table.csv`, ...).

mod error;
mod writer;

pub use error::{OutputError, Result};
pub use writer::{ensure_output_dir, export_tables, write_table};
