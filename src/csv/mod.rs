//! CSV citation reader.
//!
//! Reads citation-manager exports: the first row names the columns and every
//! following row is one record. The citation type comes from a designated
//! column (`Item Type` by default).
//!
//! # Example
//!
//! ```
//! use bulk_ill::{CsvConfig, CsvReader};
//!
//! let input = "Item Type,Title,Author\nbook,Foo,Bar\n";
//! let reader = CsvReader::from_reader(input.as_bytes(), CsvConfig::new()).unwrap();
//! let records: Vec<_> = reader.collect();
//! let record = records[0].as_ref().unwrap();
//! assert_eq!(record.row, 2);
//! assert_eq!(record.label, "book");
//! assert_eq!(record.get("Title"), Some("Foo"));
//! ```

mod config;
mod lines;

pub use config::{CsvConfig, DEFAULT_TYPE_COLUMN};

use csv_crate::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{RecordError, Result, RowError};
use crate::record::{RawRecord, SourceFormat};
use crate::utils::strip_bom;
use lines::LineTracker;

/// Lazy reader yielding one [`RawRecord`] (or row-level error) per data row.
///
/// Extra columns pass through and short rows are tolerated. Blank rows are
/// skipped but still count towards the physical row numbers.
pub struct CsvReader<R> {
    reader: csv_crate::Reader<LineTracker<R>>,
    headers: Vec<String>,
    type_index: Option<usize>,
    config: CsvConfig,
    record: StringRecord,
    last_row: usize,
    finished: bool,
}

impl CsvReader<File> {
    /// Opens a CSV file for reading.
    pub fn from_path<P: AsRef<Path>>(path: P, config: CsvConfig) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file, config)
    }
}

impl<R: Read> CsvReader<R> {
    /// Wraps a reader, consuming the header row.
    ///
    /// # Errors
    ///
    /// Returns an error if the header row cannot be read.
    pub fn from_reader(input: R, config: CsvConfig) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .delimiter(config.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(LineTracker::new(input));

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let header = if i == 0 { strip_bom(header) } else { header };
                header.trim().to_string()
            })
            .collect();

        let type_index = headers.iter().position(|h| *h == config.type_column);
        if type_index.is_none() && !headers.is_empty() {
            tracing::warn!(
                column = %config.type_column,
                "CSV header has no citation type column; every row will be rejected"
            );
        }

        Ok(Self {
            reader,
            headers,
            type_index,
            config,
            record: StringRecord::new(),
            last_row: 1,
            finished: false,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    fn line_at(&self, position: Option<&csv_crate::Position>) -> usize {
        position
            .map(|p| self.reader.get_ref().line_at(p.byte()))
            .unwrap_or(self.last_row + 1)
    }

    fn convert(&self, row: usize) -> std::result::Result<RawRecord, RowError> {
        let label = self
            .type_index
            .and_then(|i| self.record.get(i))
            .map(str::trim)
            .filter(|label| !label.is_empty());

        let Some(label) = label else {
            return Err(RowError::new(
                row,
                None,
                RecordError::malformed(format!(
                    "missing type field '{}'",
                    self.config.type_column
                )),
            ));
        };

        let mut raw = RawRecord::new(row, label, SourceFormat::Csv);
        for (i, (header, value)) in self.headers.iter().zip(self.record.iter()).enumerate() {
            if Some(i) == self.type_index || header.is_empty() {
                continue;
            }
            let value = if self.config.trim { value.trim() } else { value };
            raw.push(header.as_str(), value);
        }

        Ok(raw)
    }
}

impl<R: Read> Iterator for CsvReader<R> {
    type Item = std::result::Result<RawRecord, RowError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            match self.reader.read_record(&mut self.record) {
                Ok(false) => self.finished = true,
                Ok(true) => {
                    let row = self.line_at(self.record.position());
                    self.last_row = row;

                    if self.record.iter().all(|value| value.trim().is_empty()) {
                        tracing::debug!(row, "skipping blank CSV row");
                        continue;
                    }

                    return Some(self.convert(row));
                }
                Err(err) => {
                    let row = self.line_at(err.position());
                    self.last_row = row;
                    // An I/O failure leaves the reader in an unknown state.
                    if err.is_io_error() {
                        self.finished = true;
                    }
                    return Some(Err(RowError::new(
                        row,
                        None,
                        RecordError::malformed(err.to_string()),
                    )));
                }
            }
        }
        None
    }
}
