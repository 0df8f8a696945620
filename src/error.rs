//! Error types.
//!
//! Two tiers exist. [`InputError`] is fatal and is returned before any record is
//! processed (the file could not be opened or recognised). [`RecordError`] is
//! scoped to a single input row and is collected into the batch result; it never
//! stops the batch.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::registry::Template;

/// A specialized Result type for whole-file operations.
pub type Result<T> = std::result::Result<T, InputError>;

/// A failure to read the input file as a whole.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("The file {} is empty", .path.display())]
    EmptyFile { path: PathBuf },

    #[error("The file {} is not a valid file type. Must be CSV or RIS", .path.display())]
    UnrecognizedFormat { path: PathBuf },

    #[error("CSV error: {0}")]
    Csv(#[from] csv_crate::Error),
}

/// A failure scoped to one input record.
///
/// The `Display` text is the human-readable reason shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordError {
    #[error("Unsupported citation type: '{label}'")]
    UnknownCitationType { label: String },

    #[error("Malformed record: {reason}")]
    MalformedRecord { reason: String },

    #[error("Missing required fields: {}", .fields.join(", "))]
    MissingRequiredFields { fields: Vec<String> },
}

impl RecordError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        RecordError::MalformedRecord {
            reason: reason.into(),
        }
    }
}

/// One entry in a batch's error list.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("Row {row}: {error}")]
pub struct RowError {
    /// Originating row (CSV, header is row 1) or record ordinal (RIS).
    pub row: usize,
    /// The raw citation-type label, when one was read.
    pub label: Option<String>,
    pub error: RecordError,
}

impl RowError {
    pub fn new(row: usize, label: Option<String>, error: RecordError) -> Self {
        Self { row, label, error }
    }

    /// Human-readable reason for the rejection.
    pub fn reason(&self) -> String {
        self.error.to_string()
    }
}

/// Input fields that had no backend equivalent and were dropped.
///
/// Informational only: the row still produced a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationGap {
    pub row: usize,
    pub label: String,
    pub fields: Vec<String>,
}

/// Errors raised while loading a citation-type table.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Invalid registry table: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Citation type '{label}' is mapped more than once")]
    DuplicateLabel { label: String },

    #[error("Registry row for template {template} has no type labels")]
    NoAliases { template: Template },
}
