//! Excel file parser (xls, xlsx)

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{bail, Context, Result};
use calamine::{open_workbook, CellErrorType, Data, Range, Reader, Xls, Xlsx};

use crate::model::{CellValue, TabularFile};
use crate::options::LoadOptions;

use super::FileKind;

/// Parse the first worksheet of a workbook into a table. The format is
/// passed explicitly because a lock rename may strip the extension.
pub fn parse_excel_file(kind: FileKind, path: &Path, options: &LoadOptions) -> Result<TabularFile> {
    let range = match kind {
        FileKind::Xlsx => {
            let mut workbook: Xlsx<_> = open_workbook(path)
                .with_context(|| format!("Failed to open Excel file: {}", path.display()))?;
            first_sheet_range(&mut workbook, path)?
        }
        FileKind::Xls => {
            let mut workbook: Xls<_> = open_workbook(path)
                .with_context(|| format!("Failed to open Excel file: {}", path.display()))?;
            first_sheet_range(&mut workbook, path)?
        }
        FileKind::Csv | FileKind::Unsupported => {
            bail!("Not a workbook format: {}", path.display())
        }
    };

    Ok(parse_range(&range, options))
}

fn first_sheet_range<R>(workbook: &mut R, path: &Path) -> Result<Range<Data>>
where
    R: Reader<BufReader<File>>,
    R::Error: std::error::Error + Send + Sync + 'static,
{
    let sheets = workbook.sheet_names();
    if sheets.is_empty() {
        bail!("No sheets found in workbook: {}", path.display());
    }
    let sheet_name = sheets[0].clone();

    workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet: {}", sheet_name))
}

fn parse_range(range: &Range<Data>, options: &LoadOptions) -> TabularFile {
    // Rows with no values at all are skipped, so the header is the first
    // row that actually carries data.
    let raw: Vec<Vec<CellValue>> = range
        .rows()
        .filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)))
        .map(|row| row.iter().map(normalize_cell).collect())
        .collect();

    if options.headers {
        TabularFile::keyed(raw)
    } else {
        TabularFile::positional(raw)
    }
}

/// Normalize one workbook cell. Zero is a present value and survives as a
/// number; `#N/A` becomes empty; strings are trimmed.
fn normalize_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                CellValue::Empty
            } else {
                CellValue::Str(trimmed.to_string())
            }
        }
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Str(b.to_string()),
        Data::DateTime(dt) => CellValue::Str(dt.to_string()),
        Data::DateTimeIso(s) => CellValue::Str(s.clone()),
        Data::DurationIso(s) => CellValue::Str(s.clone()),
        Data::Error(CellErrorType::NA) => CellValue::Empty,
        Data::Error(e) => CellValue::Str(e.to_string()),
    }
}
