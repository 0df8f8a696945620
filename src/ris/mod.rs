//! RIS citation reader.
//!
//! Records run from a `TY` line to an `ER` line. Tags are normalised onto the
//! canonical field names used by CSV exports, and repeated tags such as
//! several `AU` lines are joined in encounter order.
//!
//! # Example
//!
//! ```
//! use bulk_ill::RisReader;
//!
//! let input = r#"TY  - JOUR
//! AU  - Smith, J.
//! AU  - Doe, A.
//! TI  - Study
//! ER  -"#;
//!
//! let records: Vec<_> = RisReader::new(input.as_bytes()).collect();
//! let record = records[0].as_ref().unwrap();
//! assert_eq!(record.label, "JOUR");
//! assert_eq!(record.get("Author"), Some("Smith, J.; Doe, A."));
//! ```

mod parse;
mod structure;
mod tags;

pub use structure::MULTI_VALUE_SEPARATOR;
pub(crate) use parse::is_metadata_line;

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Lines, Read};
use std::path::Path;

use crate::error::{RecordError, Result, RowError};
use crate::record::RawRecord;
use crate::utils::strip_bom;
use parse::parse_ris_line;
use structure::RisDraft;
use tags::RisTag;

/// Lazy reader yielding one [`RawRecord`] (or row-level error) per RIS record.
///
/// A record that is not closed by `ER` before the next `TY` or the end of the
/// input is reported as malformed and reading carries on.
pub struct RisReader<B> {
    lines: Lines<B>,
    line_number: usize,
    ordinal: usize,
    current: Option<RisDraft>,
    finished: bool,
}

impl RisReader<BufReader<File>> {
    /// Opens a RIS file for reading.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> RisReader<BufReader<R>> {
    pub fn from_reader(input: R) -> Self {
        Self::new(BufReader::new(input))
    }
}

impl<B: BufRead> RisReader<B> {
    pub fn new(input: B) -> Self {
        Self {
            lines: input.lines(),
            line_number: 0,
            ordinal: 0,
            current: None,
            finished: false,
        }
    }

    /// Handle one line; returns an item when a record closes or is abandoned.
    fn consume(&mut self, line: &str) -> Option<std::result::Result<RawRecord, RowError>> {
        let line = if self.line_number == 1 { strip_bom(line) } else { line };
        let line = line.trim();
        if line.is_empty() || is_metadata_line(line) {
            return None;
        }

        let Some((tag, content)) = parse_ris_line(line) else {
            tracing::debug!(line = self.line_number, "ignoring non-tag RIS line");
            return None;
        };

        match tag {
            RisTag::Type => {
                self.ordinal += 1;
                let draft = RisDraft::new(self.ordinal, self.line_number, content);
                self.current.replace(draft).map(|previous| {
                    Err(previous.into_error(format!(
                        "record starting on line {} is not terminated by ER before the next TY",
                        previous.start_line
                    )))
                })
            }
            RisTag::EndOfReference => match self.current.take() {
                Some(draft) => Some(draft.finish()),
                None => {
                    tracing::debug!(line = self.line_number, "ignoring ER outside of a record");
                    None
                }
            },
            tag => {
                match self.current.as_mut() {
                    Some(draft) => draft.add(tag, content),
                    None => tracing::warn!(
                        line = self.line_number,
                        tag = tag.as_tag(),
                        "ignoring RIS tag outside of a record"
                    ),
                }
                None
            }
        }
    }
}

impl<B: BufRead> Iterator for RisReader<B> {
    type Item = std::result::Result<RawRecord, RowError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            match self.lines.next() {
                Some(Ok(line)) => {
                    self.line_number += 1;
                    if let Some(item) = self.consume(&line) {
                        return Some(item);
                    }
                }
                Some(Err(err)) if err.kind() == ErrorKind::InvalidData => {
                    self.line_number += 1;
                    tracing::debug!(line = self.line_number, "ignoring RIS line that is not UTF-8");
                }
                Some(Err(err)) => {
                    self.finished = true;
                    let reason = format!("read failed after line {}: {err}", self.line_number);
                    return Some(Err(match self.current.take() {
                        Some(draft) => draft.into_error(reason),
                        None => RowError::new(
                            self.ordinal + 1,
                            None,
                            RecordError::malformed(reason),
                        ),
                    }));
                }
                None => {
                    self.finished = true;
                    return self.current.take().map(|draft| {
                        Err(draft.into_error(format!(
                            "record starting on line {} is not terminated by ER before the end of the file",
                            draft.start_line
                        )))
                    });
                }
            }
        }
        None
    }
}
