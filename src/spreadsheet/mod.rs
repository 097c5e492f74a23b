//! Spreadsheet decoding for the registration export.
//
// The upstream system exports a workbook whose first sheet holds one course
// section per row. Only the fixed region A1:L50 is read, and every cell is
// keyed by its position in `COLUMN_HEADERS`.

use log::debug;
use std::path::{Path, PathBuf};

mod csv_import;
mod xlsx;

pub use csv_import::decode_csv;
pub use xlsx::decode_xlsx;

pub const COURSE_LISTING: &str = "Course Listing";
pub const CREDITS: &str = "Credits";
pub const GRADING_BASIS: &str = "Grading Basis";
pub const SECTION: &str = "Section";
pub const INSTRUCTIONAL_FORMAT: &str = "Instructional Format";
pub const DELIVERY_MODE: &str = "Delivery Mode";
pub const MEETING_PATTERNS: &str = "Meeting Patterns";
pub const REGISTRATION_STATUS: &str = "Registration Status";
pub const INSTRUCTOR: &str = "Instructor";
pub const START_DATE: &str = "Start Date";
pub const END_DATE: &str = "End Date";

/// Column names for columns A through L, in sheet order.
pub const COLUMN_HEADERS: [&str; 12] = [
    "",
    COURSE_LISTING,
    CREDITS,
    GRADING_BASIS,
    SECTION,
    INSTRUCTIONAL_FORMAT,
    DELIVERY_MODE,
    MEETING_PATTERNS,
    REGISTRATION_STATUS,
    INSTRUCTOR,
    START_DATE,
    END_DATE,
];

/// The rectangular part of the sheet that is decoded (0-based, end exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeRegion {
    pub rows: u32,
    pub columns: u32,
}

/// A1:L50
pub const DECODE_REGION: DecodeRegion = DecodeRegion { rows: 50, columns: 12 };

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Spreadsheet is unavailable ({locator}): {reason}. Please try again.")]
    Unavailable { locator: String, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Workbook could not be opened: {0}")]
    Workbook(String),
    #[error("Workbook contains no worksheets")]
    NoWorksheet,
    #[error("CSV export could not be read: {0}")]
    Csv(#[from] csv::Error),
}

/// One decoded spreadsheet row. Immutable once read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceRow {
    /// 1-based row number in the sheet, for diagnostics.
    pub line: u32,
    cells: [Option<String>; 12],
}

impl SourceRow {
    pub fn new(line: u32) -> Self {
        Self { line, cells: Default::default() }
    }

    /// Builds a row from `(column name, value)` pairs. Unknown column names
    /// are ignored and empty values are treated as absent.
    pub fn from_pairs<'a, I>(line: u32, pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut row = Self::new(line);
        for (column, value) in pairs {
            if let Some(idx) = column_index(column) {
                row.set(idx, value);
            }
        }
        row
    }

    pub(crate) fn set(&mut self, column: usize, value: &str) {
        if column < self.cells.len() && !value.is_empty() {
            self.cells[column] = Some(value.to_string());
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        column_index(column).and_then(|idx| self.cells[idx].as_deref())
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    pub fn course_listing(&self) -> Option<&str> {
        self.get(COURSE_LISTING)
    }

    pub fn section(&self) -> Option<&str> {
        self.get(SECTION)
    }

    pub fn meeting_patterns(&self) -> Option<&str> {
        self.get(MEETING_PATTERNS)
    }

    pub fn registration_status(&self) -> Option<&str> {
        self.get(REGISTRATION_STATUS)
    }

    pub fn instructor(&self) -> Option<&str> {
        self.get(INSTRUCTOR)
    }

    pub fn start_date(&self) -> Option<&str> {
        self.get(START_DATE)
    }

    pub fn end_date(&self) -> Option<&str> {
        self.get(END_DATE)
    }
}

fn column_index(column: &str) -> Option<usize> {
    COLUMN_HEADERS.iter().position(|header| *header == column)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadsheetFormat {
    Xlsx,
    Csv,
}

impl SpreadsheetFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xlsx" | "xlsm" => Some(Self::Xlsx),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// XLSX files are ZIP archives; anything else is read as CSV text.
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(b"PK\x03\x04") {
            Self::Xlsx
        } else {
            Self::Csv
        }
    }
}

/// Decodes raw spreadsheet bytes into rows using the given format.
pub fn decode(bytes: &[u8], format: SpreadsheetFormat) -> Result<Vec<SourceRow>, DecodeError> {
    match format {
        SpreadsheetFormat::Xlsx => decode_xlsx(bytes),
        SpreadsheetFormat::Csv => decode_csv(bytes),
    }
}

/// Supplies raw spreadsheet bytes for an opaque locator.
pub trait SpreadsheetSource {
    fn fetch(&self, locator: &str) -> Result<Vec<u8>, SourceError>;

    /// Format hint for the locator, if the source can tell.
    fn format_hint(&self, _locator: &str) -> Option<SpreadsheetFormat> {
        None
    }
}

/// Reads spreadsheets from the local filesystem. Locators are paths,
/// resolved against `base` when relative.
#[derive(Debug, Clone, Default)]
pub struct LocalFileSource {
    base: Option<PathBuf>,
}

impl LocalFileSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self { base: Some(base.into()) }
    }

    fn resolve(&self, locator: &str) -> PathBuf {
        match &self.base {
            Some(base) => base.join(locator),
            None => PathBuf::from(locator),
        }
    }
}

impl SpreadsheetSource for LocalFileSource {
    fn fetch(&self, locator: &str) -> Result<Vec<u8>, SourceError> {
        let path = self.resolve(locator);
        debug!("Reading spreadsheet from {}", path.display());
        std::fs::read(&path).map_err(|e| SourceError::Unavailable {
            locator: locator.to_string(),
            reason: e.to_string(),
        })
    }

    fn format_hint(&self, locator: &str) -> Option<SpreadsheetFormat> {
        SpreadsheetFormat::from_path(&self.resolve(locator))
    }
}
