//! Run results reported by the binary.

use std::path::PathBuf;

use shelter_model::TableKind;
use shelter_transform::TableAudit;

/// Paths and options of one pipeline run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub intake: PathBuf,
    pub outcome: PathBuf,
    pub output_dir: PathBuf,
    /// Build and audit every table without writing files.
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct RunResult {
    pub output_dir: PathBuf,
    pub dry_run: bool,
    /// Built tables in export order.
    pub tables: Vec<TableSummary>,
    /// Tables that could not be built, with the reason.
    pub errors: Vec<String>,
    pub has_errors: bool,
}

#[derive(Debug)]
pub struct TableSummary {
    pub table: TableKind,
    pub records: usize,
    pub columns: usize,
    /// Written file; `None` on a dry run.
    pub output: Option<PathBuf>,
    pub audit: TableAudit,
}
