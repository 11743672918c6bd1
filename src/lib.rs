//! tabfile - Load and write tabular data files
//!
//! Reads CSV and Excel (.xls/.xlsx) files into a uniform in-memory table
//! (`TabularFile`), optionally keying rows by a header row, and writes
//! tables back out as date-stamped CSV files. Parsing and encoding are
//! delegated to the csv and calamine crates.

pub mod loader;
pub mod model;
pub mod options;
pub mod parser;
pub mod writer;

pub use loader::{load, FileResult, Loaded, Source};
pub use model::{CellValue, Record, TabularFile};
pub use options::LoadOptions;
pub use parser::FileKind;
pub use writer::{write, SavedFile};
