//! CSV file parser

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::{CellValue, TabularFile};
use crate::options::LoadOptions;

/// Parse a CSV file from disk
pub fn parse_csv_file(path: &Path, options: &LoadOptions) -> Result<TabularFile> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    parse_csv_text(&text, options)
        .with_context(|| format!("Unable to parse \"{}\"", path.display()))
}

/// Parse CSV text into a table. Headers are handled here rather than by the
/// csv reader so that headerless mode returns the first row as data.
pub fn parse_csv_text(text: &str, options: &LoadOptions) -> Result<TabularFile> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut raw: Vec<Vec<CellValue>> = Vec::new();
    for (line_num, result) in reader.records().enumerate() {
        let record =
            result.with_context(|| format!("Failed to read CSV row {}", line_num + 1))?;
        raw.push(record.iter().map(CellValue::from).collect());
    }

    Ok(shape_rows(raw, options))
}

/// Parse rows already held in memory, no file I/O
pub fn parse_csv_rows(rows: Vec<Vec<String>>, options: &LoadOptions) -> Result<TabularFile> {
    let raw = rows
        .into_iter()
        .map(|row| row.into_iter().map(CellValue::from).collect())
        .collect();
    Ok(shape_rows(raw, options))
}

fn shape_rows(raw: Vec<Vec<CellValue>>, options: &LoadOptions) -> TabularFile {
    if options.headers {
        TabularFile::keyed(raw)
    } else {
        TabularFile::positional(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    #[test]
    fn test_header_mapping() {
        let table =
            parse_csv_text("a,b\n1,2\n3,4", &LoadOptions::default()).unwrap();

        assert_eq!(table.columns, vec!["a", "b"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0].get("a"), Some(&CellValue::from("1")));
        assert_eq!(table.rows[0].get("b"), Some(&CellValue::from("2")));
        assert_eq!(table.rows[1].get("a"), Some(&CellValue::from("3")));
        assert_eq!(table.rows[1].get("b"), Some(&CellValue::from("4")));
    }

    #[test]
    fn test_headerless_mode() {
        let options = LoadOptions::default().with_headers(false);
        let table = parse_csv_text("a,b\n1,2\n3,4", &options).unwrap();

        assert!(table.columns.is_empty());
        assert_eq!(table.row_count(), 3);
        assert_eq!(
            table.rows[0],
            Record::Positional(vec![CellValue::from("a"), CellValue::from("b")])
        );
        assert_eq!(
            table.rows[2],
            Record::Positional(vec![CellValue::from("3"), CellValue::from("4")])
        );
    }

    #[test]
    fn test_short_row_fills_empty() {
        let table = parse_csv_text("a,b\n1", &LoadOptions::default()).unwrap();

        assert_eq!(table.rows[0].get("a"), Some(&CellValue::from("1")));
        assert_eq!(table.rows[0].get("b"), Some(&CellValue::Empty));
    }

    #[test]
    fn test_quoted_fields_delegate_to_csv_crate() {
        let table =
            parse_csv_text("a,b\n\"x,y\",2", &LoadOptions::default()).unwrap();

        assert_eq!(table.rows[0].get("a"), Some(&CellValue::from("x,y")));
    }

    #[test]
    fn test_inline_rows() {
        let rows = vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["1".to_string(), "2".to_string()],
        ];
        let table = parse_csv_rows(rows, &LoadOptions::default()).unwrap();

        assert_eq!(table.columns, vec!["a", "b"]);
        assert_eq!(table.rows[0].get("b"), Some(&CellValue::from("2")));
    }

    #[test]
    fn test_missing_file_errors() {
        let err = parse_csv_file(
            Path::new("/nonexistent/data.csv"),
            &LoadOptions::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
