//! Loading entry point: single files, file lists, directories, inline rows

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::TabularFile;
use crate::options::LoadOptions;
use crate::parser::{self, parse_csv_rows, FileKind};

/// What to load
#[derive(Debug, Clone)]
pub enum Source {
    /// Rows already in memory, parsed as CSV-shaped data without file I/O
    Inline(Vec<Vec<String>>),
    /// A single file, or a directory to load in full
    Path(PathBuf),
    /// An explicit list of files
    Paths(Vec<PathBuf>),
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Source::Path(path)
    }
}

impl From<&Path> for Source {
    fn from(path: &Path) -> Self {
        Source::Path(path.to_path_buf())
    }
}

impl From<&str> for Source {
    fn from(path: &str) -> Self {
        Source::Path(PathBuf::from(path))
    }
}

impl From<Vec<PathBuf>> for Source {
    fn from(paths: Vec<PathBuf>) -> Self {
        Source::Paths(paths)
    }
}

impl From<Vec<Vec<String>>> for Source {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Source::Inline(rows)
    }
}

/// One file's parse result within a batch load
#[derive(Debug)]
pub struct FileResult {
    pub path: PathBuf,
    pub table: TabularFile,
}

/// Result of a load: one table for single inputs, per-file results for
/// directory or list inputs
#[derive(Debug)]
pub enum Loaded {
    Single(TabularFile),
    Batch(Vec<FileResult>),
}

impl Loaded {
    /// Unwrap a single-table result
    pub fn into_single(self) -> Option<TabularFile> {
        match self {
            Loaded::Single(table) => Some(table),
            Loaded::Batch(_) => None,
        }
    }

    /// Unwrap a batch result
    pub fn into_batch(self) -> Option<Vec<FileResult>> {
        match self {
            Loaded::Single(_) => None,
            Loaded::Batch(results) => Some(results),
        }
    }
}

/// Load tabular data from the given source.
///
/// Directories and path lists are processed strictly sequentially, one file
/// at a time; the first failure aborts the whole batch and is returned with
/// no partial results.
pub fn load(source: impl Into<Source>, options: &LoadOptions) -> Result<Loaded> {
    match source.into() {
        Source::Inline(rows) => parse_csv_rows(rows, options).map(Loaded::Single),
        Source::Paths(paths) => load_batch(paths, options).map(Loaded::Batch),
        Source::Path(path) => {
            if path.is_dir() {
                let files = list_supported_files(&path)?;
                load_batch(files, options).map(Loaded::Batch)
            } else {
                load_file(&path, options).map(Loaded::Single)
            }
        }
    }
}

/// Enumerate a directory's loadable files, sorted by name so batch order is
/// deterministic across platforms
fn list_supported_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("Failed to read directory: {}", dir.display()))?;
        let path = entry.path();
        if path.is_file() && FileKind::of_path(&path).is_supported() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Sequential fail-fast fold over a list of files
fn load_batch(paths: Vec<PathBuf>, options: &LoadOptions) -> Result<Vec<FileResult>> {
    let mut results = Vec::with_capacity(paths.len());
    for path in paths {
        let table = load_file(&path, options)?;
        results.push(FileResult { path, table });
    }
    Ok(results)
}

fn load_file(path: &Path, options: &LoadOptions) -> Result<TabularFile> {
    if options.lock {
        // Dispatch by the original extension; the lock rename hides it
        let kind = FileKind::of_path(path);
        let locked = lock_file(path)?;
        parser::parse_file_as(kind, &locked, options)
    } else {
        parser::parse_file(path, options)
    }
}

/// Advisory lock: rename the file to `<name>.lock` and hand back the new
/// path to read from. Not atomic against external writers, best effort only.
fn lock_file(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Invalid file name: {}", path.display()))?;
    let locked = path.with_file_name(format!("{file_name}.lock"));
    fs::rename(path, &locked)
        .with_context(|| format!("Failed to lock file: {}", path.display()))?;
    Ok(locked)
}
