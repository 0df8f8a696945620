//! Record data structures shared by the readers, validator and builder.

use serde::Serialize;
use std::fmt;

use crate::ris::is_metadata_line;

/// Canonical field names.
///
/// These are the column names of a citation-manager CSV export. The RIS reader
/// normalises tags onto the same names so later stages see one shape.
pub mod field {
    pub const TITLE: &str = "Title";
    pub const AUTHOR: &str = "Author";
    pub const PUBLICATION_TITLE: &str = "Publication Title";
    pub const PUBLICATION_YEAR: &str = "Publication Year";
    pub const VOLUME: &str = "Volume";
    pub const ISSUE: &str = "Issue";
    pub const PAGES: &str = "Pages";
    pub const DOI: &str = "DOI";
    pub const ISSN: &str = "ISSN";
    pub const ISBN: &str = "ISBN";
    pub const PUBLISHER: &str = "Publisher";
    pub const PLACE: &str = "Place";
    pub const EDITION: &str = "Edition";
    pub const CONFERENCE_NAME: &str = "Conference Name";
    pub const CALL_NUMBER: &str = "Call Number";
}

/// Input file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SourceFormat {
    Csv,
    Ris,
}

impl SourceFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::Csv => "CSV",
            SourceFormat::Ris => "RIS",
        }
    }

    /// Sniffs the format from the first non-blank line.
    ///
    /// Database preamble lines such as `Record #1 of 2` are skipped. A RIS
    /// type tag marks a RIS file and a comma marks a CSV file. Returns `None`
    /// for blank input or anything else.
    ///
    /// ```
    /// use bulk_ill::SourceFormat;
    ///
    /// assert_eq!(SourceFormat::detect("\nTY  - JOUR\n"), Some(SourceFormat::Ris));
    /// assert_eq!(SourceFormat::detect("Item Type,Title\n"), Some(SourceFormat::Csv));
    /// assert_eq!(SourceFormat::detect("hello"), None);
    /// ```
    pub fn detect(text: &str) -> Option<Self> {
        Self::detect_with_delimiter(text, b',')
    }

    /// Like [`detect`](Self::detect) for CSV files using another delimiter.
    pub fn detect_with_delimiter(text: &str, delimiter: u8) -> Option<Self> {
        let first_line = crate::utils::strip_bom(text)
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty() && !is_metadata_line(line))?;

        if first_line.contains("TY  -") {
            Some(SourceFormat::Ris)
        } else if first_line.contains(char::from(delimiter)) {
            Some(SourceFormat::Csv)
        } else {
            None
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One input record as read from the source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawRecord {
    /// Row number (CSV, header is row 1) or record ordinal (RIS), 1-based.
    pub row: usize,
    /// The citation-type label exactly as found in the source.
    pub label: String,
    pub format: SourceFormat,
    /// Field name/value pairs in encounter order.
    pub fields: Vec<(String, String)>,
}

impl RawRecord {
    pub fn new(row: usize, label: impl Into<String>, format: SourceFormat) -> Self {
        Self {
            row,
            label: label.into(),
            format,
            fields: Vec::new(),
        }
    }

    /// Builder-style field insertion.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    pub(crate) fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// First value recorded under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether `name` holds a value that is non-empty after trimming.
    pub fn has_value(&self, name: &str) -> bool {
        self.fields
            .iter()
            .any(|(field, value)| field == name && !value.trim().is_empty())
    }
}

/// A record proven to contain every field its type requires.
///
/// Only the validator constructs these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRecord {
    record: RawRecord,
}

impl ValidatedRecord {
    pub(crate) fn new(record: RawRecord) -> Self {
        Self { record }
    }

    pub fn row(&self) -> usize {
        self.record.row
    }

    pub fn label(&self) -> &str {
        &self.record.label
    }

    pub fn format(&self) -> SourceFormat {
        self.record.format
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.record.fields
    }

    /// First non-empty value under `name`, trimmed.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.record
            .fields
            .iter()
            .filter(|(field, _)| field == name)
            .map(|(_, value)| value.trim())
            .find(|value| !value.is_empty())
    }
}
