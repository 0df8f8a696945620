//! In-progress RIS record.

use crate::error::{RecordError, RowError};
use crate::record::{RawRecord, SourceFormat, field};
use crate::ris::tags::RisTag;
use crate::utils::{join_page_range, ris_year};

/// Separator placed between repeated values of one field.
pub const MULTI_VALUE_SEPARATOR: &str = "; ";

/// A RIS record between its `TY` and `ER` lines.
#[derive(Debug, Clone)]
pub(crate) struct RisDraft {
    /// 1-based position of the record in the file.
    pub(crate) ordinal: usize,
    /// Line holding the `TY` tag.
    pub(crate) start_line: usize,
    pub(crate) label: String,
    fields: Vec<(String, String)>,
    start_page: Option<String>,
    end_page: Option<String>,
}

impl RisDraft {
    pub(crate) fn new(ordinal: usize, start_line: usize, label: String) -> Self {
        Self {
            ordinal,
            start_line,
            label,
            fields: Vec::new(),
            start_page: None,
            end_page: None,
        }
    }

    /// Add one tag line's content.
    pub(crate) fn add(&mut self, tag: RisTag, content: String) {
        if content.is_empty() {
            return;
        }

        match tag {
            RisTag::StartPage => {
                self.start_page.get_or_insert(content);
            }
            RisTag::EndPage => {
                self.end_page.get_or_insert(content);
            }
            RisTag::Type | RisTag::EndOfReference => {}
            tag => {
                let name = match tag.canonical_field() {
                    Some(name) => name.to_string(),
                    None => tag.as_tag().to_string(),
                };
                let value = if tag.is_date_tag() {
                    ris_year(&content).to_string()
                } else {
                    content
                };
                if tag.accumulates() {
                    self.append(name, value);
                } else {
                    self.insert_first(name, value);
                }
            }
        }
    }

    fn append(&mut self, name: String, value: String) {
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some((_, existing)) => {
                existing.push_str(MULTI_VALUE_SEPARATOR);
                existing.push_str(&value);
            }
            None => self.fields.push((name, value)),
        }
    }

    fn insert_first(&mut self, name: String, value: String) {
        if value.is_empty() || self.fields.iter().any(|(field, _)| *field == name) {
            return;
        }
        self.fields.push((name, value));
    }

    /// Close the record.
    pub(crate) fn finish(self) -> Result<RawRecord, RowError> {
        if self.label.is_empty() {
            return Err(self.into_error(format!(
                "record starting on line {} has an empty TY tag",
                self.start_line
            )));
        }

        let mut record = RawRecord::new(self.ordinal, self.label, SourceFormat::Ris);
        record.fields = self.fields;
        if let Some(pages) = join_page_range(self.start_page.as_deref(), self.end_page.as_deref())
        {
            record.push(field::PAGES, pages);
        }
        Ok(record)
    }

    /// Turn an abandoned record into a row-level error.
    pub(crate) fn into_error(&self, reason: impl Into<String>) -> RowError {
        let label = (!self.label.is_empty()).then(|| self.label.clone());
        RowError::new(self.ordinal, label, RecordError::malformed(reason))
    }
}
