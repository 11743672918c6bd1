//! Parser layer for reading tabular data formats

mod csv;
mod excel;

use std::path::Path;

use anyhow::{bail, Result};

use crate::model::TabularFile;
use crate::options::LoadOptions;

pub use self::csv::{parse_csv_file, parse_csv_rows, parse_csv_text};
pub use self::excel::parse_excel_file;

/// Supported file formats, dispatched by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Xls,
    Xlsx,
    Unsupported,
}

impl FileKind {
    /// Map a file extension to a format. Matching is case-insensitive;
    /// anything unrecognized is `Unsupported`.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "csv" => FileKind::Csv,
            "xls" => FileKind::Xls,
            "xlsx" => FileKind::Xlsx,
            _ => FileKind::Unsupported,
        }
    }

    /// Determine the format of a path from its extension
    pub fn of_path(path: &Path) -> Self {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Self::from_extension(ext)
    }

    /// Whether this format can be loaded
    pub fn is_supported(&self) -> bool {
        !matches!(self, FileKind::Unsupported)
    }
}

/// Parse a single file, dispatching on its extension
pub fn parse_file(path: &Path, options: &LoadOptions) -> Result<TabularFile> {
    parse_file_as(FileKind::of_path(path), path, options)
}

/// Parse a file whose format is already known. Used after lock renames,
/// where the on-disk name no longer carries the original extension.
pub fn parse_file_as(kind: FileKind, path: &Path, options: &LoadOptions) -> Result<TabularFile> {
    match kind {
        FileKind::Csv => parse_csv_file(path, options),
        FileKind::Xls | FileKind::Xlsx => parse_excel_file(kind, path, options),
        FileKind::Unsupported => bail!(
            "Unsupported file format: {}",
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_from_extension() {
        assert_eq!(FileKind::from_extension("csv"), FileKind::Csv);
        assert_eq!(FileKind::from_extension("CSV"), FileKind::Csv);
        assert_eq!(FileKind::from_extension("Xlsx"), FileKind::Xlsx);
        assert_eq!(FileKind::from_extension("xls"), FileKind::Xls);
        assert_eq!(FileKind::from_extension("pdf"), FileKind::Unsupported);
        assert_eq!(FileKind::from_extension(""), FileKind::Unsupported);
    }

    #[test]
    fn test_unsupported_extension_errors() {
        let path = PathBuf::from("report.pdf");
        let err = parse_file(&path, &LoadOptions::default()).unwrap_err();
        assert!(err.to_string().contains("Unsupported file format"));
    }
}
