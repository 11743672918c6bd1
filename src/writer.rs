//! CSV writer with date-stamped file names

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Local;

use crate::model::TabularFile;

/// Where a table was written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    /// File name including the timestamp suffix
    pub saved_name: String,
    /// Directory the file was written into
    pub directory: PathBuf,
}

/// Serialize a table to CSV and persist it as
/// `<dir>/<base_name>_<YYYYMMDD_HHMMSS>.csv`.
///
/// Keyed records are laid out in `columns` order with missing keys written
/// as empty cells; a header row is emitted whenever the table has columns.
pub fn write(table: &TabularFile, dir: impl AsRef<Path>, base_name: &str) -> Result<SavedFile> {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let saved_name = format!("{base_name}_{stamp}.csv");
    write_named(table, dir, &saved_name)
}

fn write_named(table: &TabularFile, dir: impl AsRef<Path>, saved_name: &str) -> Result<SavedFile> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        bail!("Not a directory: {}", dir.display());
    }

    let data = encode_csv(table)?;
    let path = dir.join(saved_name);
    fs::write(&path, data)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(SavedFile {
        saved_name: saved_name.to_string(),
        directory: dir.to_path_buf(),
    })
}

/// Encode the table to CSV bytes, delegating quoting to the csv crate
fn encode_csv(table: &TabularFile) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    if table.has_columns() {
        writer
            .write_record(&table.columns)
            .context("Unable to stringify CSV file")?;
        for record in &table.rows {
            let cells = record.to_positional(&table.columns);
            writer
                .write_record(cells.iter().map(|c| c.display().into_owned()))
                .context("Unable to stringify CSV file")?;
        }
    } else {
        for record in &table.rows {
            let cells = record.to_positional(&[]);
            writer
                .write_record(cells.iter().map(|c| c.display().into_owned()))
                .context("Unable to stringify CSV file")?;
        }
    }

    writer
        .into_inner()
        .map_err(|e| e.into_error())
        .context("Unable to stringify CSV file")
}
