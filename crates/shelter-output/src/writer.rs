//! CSV writers for the final tables.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use polars::prelude::{CsvWriter, SerWriter};
use tracing::{info, info_span};

use shelter_transform::{EventFrame, FinalTables};

use crate::error::{OutputError, Result};

/// Creates the output directory and any missing parents.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| OutputError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Writes one table to `path`, replacing any existing file.
pub fn write_table(frame: &EventFrame, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| OutputError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    let mut df = frame.data.clone();
    CsvWriter::new(&mut writer)
        .include_header(true)
        .finish(&mut df)
        .map_err(|e| OutputError::CsvWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    writer.flush().map_err(|source| OutputError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes every present table into `dir` and returns the written paths in
/// export order.
pub fn export_tables(tables: &FinalTables, dir: &Path) -> Result<Vec<PathBuf>> {
    let span = info_span!("export", dir = %dir.display());
    let _guard = span.enter();
    let start = Instant::now();
    ensure_output_dir(dir)?;

    let mut written = Vec::new();
    for frame in tables.frames() {
        let path = dir.join(frame.file_name());
        write_table(frame, &path)?;
        info!(
            table = %frame.table,
            rows = frame.record_count(),
            path = %path.display(),
            "table written"
        );
        written.push(path);
    }
    info!(
        files = written.len(),
        duration_ms = start.elapsed().as_millis(),
        "export complete"
    );
    Ok(written)
}
