//! TabularFile, Record, and CellValue data structures

use std::borrow::Cow;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Normalized content of a single cell
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Number(f64),
    Str(String),
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Empty, CellValue::Empty) => true,
            (CellValue::Number(a), CellValue::Number(b)) => {
                // Handle NaN comparison
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (CellValue::Str(a), CellValue::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl CellValue {
    /// Check if the value is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Convert to a display string
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            CellValue::Empty => Cow::Borrowed(""),
            CellValue::Number(n) => {
                // Whole numbers render without a fractional part
                if n.fract() == 0.0 && n.is_finite() {
                    Cow::Owned(format!("{}", *n as i64))
                } else {
                    Cow::Owned(n.to_string())
                }
            }
            CellValue::Str(s) => Cow::Borrowed(s.as_str()),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Str(s.to_string())
        }
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Str(s)
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// One row, either keyed by column name or positional
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Record {
    Keyed(IndexMap<String, CellValue>),
    Positional(Vec<CellValue>),
}

impl Record {
    /// Get a cell by column name (keyed records only)
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        match self {
            Record::Keyed(map) => map.get(column),
            Record::Positional(_) => None,
        }
    }

    /// Convert into a positional row ordered by the given columns.
    /// Missing keys become empty cells; positional records pass through.
    pub fn to_positional(&self, columns: &[String]) -> Vec<CellValue> {
        match self {
            Record::Keyed(map) => columns
                .iter()
                .map(|c| map.get(c).cloned().unwrap_or(CellValue::Empty))
                .collect(),
            Record::Positional(cells) => cells.clone(),
        }
    }
}

/// In-memory representation of parsed rows plus optional column headers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabularFile {
    /// All rows, in source order
    pub rows: Vec<Record>,
    /// Column headers, empty when the source had none
    pub columns: Vec<String>,
}

impl TabularFile {
    /// Create a table with explicit rows and columns
    pub fn new(rows: Vec<Record>, columns: Vec<String>) -> Self {
        Self { rows, columns }
    }

    /// Build keyed records from raw rows: row 0 supplies the column names,
    /// every following row becomes one keyed record. Short rows are padded
    /// with empty cells so each record's key set equals `columns`; duplicate
    /// headers silently overwrite (last value wins).
    pub fn keyed(mut raw: Vec<Vec<CellValue>>) -> Self {
        if raw.is_empty() {
            return Self::new(Vec::new(), Vec::new());
        }

        let header = raw.remove(0);
        let columns: Vec<String> = header.iter().map(|c| c.display().into_owned()).collect();

        let rows = raw
            .into_iter()
            .map(|row| {
                let mut map = IndexMap::with_capacity(columns.len());
                for (i, name) in columns.iter().enumerate() {
                    let cell = row.get(i).cloned().unwrap_or(CellValue::Empty);
                    map.insert(name.clone(), cell);
                }
                Record::Keyed(map)
            })
            .collect();

        Self::new(rows, columns)
    }

    /// Keep raw rows as positional records with no column headers
    pub fn positional(raw: Vec<Vec<CellValue>>) -> Self {
        let rows = raw.into_iter().map(Record::Positional).collect();
        Self::new(rows, Vec::new())
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether this table carries a header row
    pub fn has_columns(&self) -> bool {
        !self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(s: &str) -> CellValue {
        CellValue::from(s)
    }

    #[test]
    fn test_keyed_builds_records_from_header_row() {
        let table = TabularFile::keyed(vec![
            vec![cell("a"), cell("b")],
            vec![cell("1"), cell("2")],
            vec![cell("3"), cell("4")],
        ]);

        assert_eq!(table.columns, vec!["a", "b"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0].get("a"), Some(&cell("1")));
        assert_eq!(table.rows[1].get("b"), Some(&cell("4")));
    }

    #[test]
    fn test_keyed_pads_short_rows() {
        let table = TabularFile::keyed(vec![vec![cell("a"), cell("b")], vec![cell("1")]]);

        assert_eq!(table.rows[0].get("b"), Some(&CellValue::Empty));
    }

    #[test]
    fn test_keyed_duplicate_headers_overwrite() {
        let table = TabularFile::keyed(vec![
            vec![cell("a"), cell("a")],
            vec![cell("1"), cell("2")],
        ]);

        // Last value wins; record still matches the column key set
        assert_eq!(table.rows[0].get("a"), Some(&cell("2")));
    }

    #[test]
    fn test_positional_keeps_rows_and_no_columns() {
        let table = TabularFile::positional(vec![
            vec![cell("a"), cell("b")],
            vec![cell("1"), cell("2")],
        ]);

        assert!(table.columns.is_empty());
        assert_eq!(table.rows[0], Record::Positional(vec![cell("a"), cell("b")]));
    }

    #[test]
    fn test_to_positional_fills_missing_keys() {
        let table = TabularFile::keyed(vec![
            vec![cell("a"), cell("b")],
            vec![cell("1"), cell("2")],
        ]);
        let columns = vec!["a".to_string(), "b".to_string(), "c".to_string()];

        assert_eq!(
            table.rows[0].to_positional(&columns),
            vec![cell("1"), cell("2"), CellValue::Empty]
        );
    }

    #[test]
    fn test_number_display_drops_whole_fraction() {
        assert_eq!(CellValue::Number(1.0).display(), "1");
        assert_eq!(CellValue::Number(1.5).display(), "1.5");
        assert_eq!(CellValue::Number(0.0).display(), "0");
    }
}
