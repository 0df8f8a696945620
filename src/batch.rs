//! Batch orchestration.
//!
//! Drives records through type resolution, validation and building, and
//! collects every outcome into one [`BatchResult`]. A bad row never stops the
//! run; only a file that cannot be opened or recognised does, and that happens
//! before the first row is read.

use serde::Serialize;
use std::fs;
use std::io::Cursor;
use std::path::Path;

use crate::csv::{CsvConfig, CsvReader};
use crate::error::{InputError, RecordError, Result, RowError, TranslationGap};
use crate::record::{RawRecord, SourceFormat};
use crate::registry::TypeRegistry;
use crate::ris::RisReader;
use crate::transaction::{RunContext, Transaction, build_with_gaps, check_submittable};
use crate::utils::strip_bom;
use crate::validate::validate;

/// Outcome of one run, in input order.
///
/// Read-only once [`run`] returns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    transactions: Vec<Transaction>,
    errors: Vec<RowError>,
    gaps: Vec<TranslationGap>,
}

impl BatchResult {
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn errors(&self) -> &[RowError] {
        &self.errors
    }

    /// Dropped input fields per built transaction. Informational only.
    pub fn gaps(&self) -> &[TranslationGap] {
        &self.gaps
    }

    /// True when no row was rejected.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of records seen, built or rejected.
    pub fn len(&self) -> usize {
        self.transactions.len() + self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Records read from one input file.
pub enum Records {
    Csv(CsvReader<Cursor<Vec<u8>>>),
    Ris(RisReader<Cursor<Vec<u8>>>),
}

impl Records {
    pub fn format(&self) -> SourceFormat {
        match self {
            Records::Csv(_) => SourceFormat::Csv,
            Records::Ris(_) => SourceFormat::Ris,
        }
    }
}

impl Iterator for Records {
    type Item = std::result::Result<RawRecord, RowError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Records::Csv(reader) => reader.next(),
            Records::Ris(reader) => reader.next(),
        }
    }
}

/// Opens an input file and picks the reader for its format.
///
/// # Errors
///
/// Returns an [`InputError`] when the file cannot be read, is blank, is not
/// recognisably CSV or RIS, or has an unreadable CSV header.
pub fn open_records<P: AsRef<Path>>(path: P, csv_config: &CsvConfig) -> Result<Records> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    // Bytes that are not UTF-8 are reported by the readers against their own row.
    let text = String::from_utf8_lossy(&bytes);

    if strip_bom(&text).trim().is_empty() {
        return Err(InputError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    let format = SourceFormat::detect_with_delimiter(&text, csv_config.delimiter()).ok_or_else(
        || InputError::UnrecognizedFormat {
            path: path.to_path_buf(),
        },
    )?;
    tracing::debug!(path = %path.display(), %format, "detected input format");

    let records = match format {
        SourceFormat::Csv => {
            Records::Csv(CsvReader::from_reader(Cursor::new(bytes), csv_config.clone())?)
        }
        SourceFormat::Ris => Records::Ris(RisReader::new(Cursor::new(bytes))),
    };
    Ok(records)
}

/// Runs every record through the pipeline.
///
/// ```
/// use bulk_ill::{CsvConfig, CsvReader, RunContext, TypeRegistry, run};
///
/// let input = "Item Type,Title,Author,Publication Year\nbook,Foo,Bar,2020\nmagazine,Baz,Qux,2021\n";
/// let reader = CsvReader::from_reader(input.as_bytes(), CsvConfig::new()).unwrap();
/// let ctx = RunContext::new("patron@example.edu", "Main Library");
///
/// let result = run(reader, TypeRegistry::builtin(), &ctx);
/// assert_eq!(result.transactions().len(), 1);
/// assert_eq!(result.errors()[0].to_string(), "Row 3: Unsupported citation type: 'magazine'");
/// ```
pub fn run<I>(records: I, registry: &TypeRegistry, ctx: &RunContext) -> BatchResult
where
    I: IntoIterator<Item = std::result::Result<RawRecord, RowError>>,
{
    tracing::info!(mode = %ctx.mode, "starting batch");

    let mut result = BatchResult::default();
    for item in records {
        match process_record(item, registry, ctx) {
            Ok((transaction, gap)) => {
                if let Some(gap) = gap {
                    tracing::debug!(
                        row = gap.row,
                        label = %gap.label,
                        fields = ?gap.fields,
                        "dropped fields without a backend equivalent"
                    );
                    result.gaps.push(gap);
                }
                result.transactions.push(transaction);
            }
            Err(error) => {
                tracing::warn!(
                    row = error.row,
                    label = error.label.as_deref().unwrap_or("-"),
                    reason = %error.error,
                    "rejected record"
                );
                result.errors.push(error);
            }
        }
    }

    tracing::info!(
        transactions = result.transactions.len(),
        errors = result.errors.len(),
        "batch finished"
    );
    result
}

/// Opens `path` and runs every record in it.
///
/// # Errors
///
/// Returns an [`InputError`] only for file-level failures; see [`open_records`].
pub fn process_file<P: AsRef<Path>>(
    path: P,
    registry: &TypeRegistry,
    csv_config: &CsvConfig,
    ctx: &RunContext,
) -> Result<BatchResult> {
    let records = open_records(path, csv_config)?;
    Ok(run(records, registry, ctx))
}

fn process_record(
    item: std::result::Result<RawRecord, RowError>,
    registry: &TypeRegistry,
    ctx: &RunContext,
) -> std::result::Result<(Transaction, Option<TranslationGap>), RowError> {
    let record = item?;
    let row = record.row;
    let label = record.label.clone();
    let reject = |error: RecordError| RowError::new(row, Some(label.clone()), error);

    let Some(mapping) = registry.resolve(&record.label) else {
        return Err(reject(RecordError::UnknownCitationType {
            label: label.clone(),
        }));
    };

    let validated = validate(record, &mapping).map_err(reject)?;
    let (transaction, gap) = build_with_gaps(&validated, &mapping, ctx);
    check_submittable(&transaction).map_err(reject)?;

    Ok((transaction, gap))
}
