//! Turns citation exports into interlibrary-loan transaction requests.
//!
//! `bulk_ill` reads a CSV or RIS file of citations, resolves each record's
//! citation type to a request schema, checks the fields that schema requires
//! and builds one flat transaction per good record. Bad records never stop a
//! run: each one becomes an error entry naming its row and the reason.
//!
//! # Pipeline
//!
//! - [`TypeRegistry`] maps raw type labels (RIS `TY` codes and
//!   citation-manager item types) to a [`TypeMapping`].
//! - [`CsvReader`] and [`RisReader`] lazily yield one [`RawRecord`] per input
//!   record, or a [`RowError`] for a record that cannot be read.
//! - [`validate`] turns a [`RawRecord`] into a [`ValidatedRecord`].
//! - [`build`] turns a [`ValidatedRecord`] into a [`Transaction`] using a
//!   [`RunContext`].
//! - [`run`] drives all of the above and returns a [`BatchResult`].
//!
//! # Basic Usage
//!
//! ```rust
//! use bulk_ill::{RisReader, RunContext, TypeRegistry, run};
//!
//! let input = r#"TY  - JOUR
//! AU  - Smith, J.
//! AU  - Doe, A.
//! TI  - Study
//! ER  -"#;
//!
//! let ctx = RunContext::new("patron@example.edu", "Main Library");
//! let result = run(RisReader::new(input.as_bytes()), TypeRegistry::builtin(), &ctx);
//!
//! assert!(result.is_clean());
//! let transaction = &result.transactions()[0];
//! assert_eq!(transaction.get("PhotoArticleAuthor"), Some("Smith, J.; Doe, A."));
//! ```
//!
//! # Files
//!
//! [`process_file`] detects the format from the file contents:
//!
//! ```no_run
//! use bulk_ill::{CsvConfig, RunContext, RunMode, TypeRegistry, process_file};
//!
//! let ctx = RunContext::new("patron@example.edu", "Main Library").with_mode(RunMode::Test);
//! let result = process_file("citations.csv", TypeRegistry::builtin(), &CsvConfig::new(), &ctx)?;
//! for error in result.errors() {
//!     eprintln!("{error}");
//! }
//! # Ok::<(), bulk_ill::InputError>(())
//! ```
//!
//! # Error Handling
//!
//! File-level failures are returned as [`InputError`] before any record is
//! processed. Everything scoped to one record is a [`RecordError`] wrapped in
//! a [`RowError`] and collected into [`BatchResult::errors`].
//!
//! # Logging
//!
//! The crate emits [`tracing`] events and never installs a subscriber.
//!
//! # Thread Safety
//!
//! The registry and a finished [`BatchResult`] are immutable and can be shared
//! between threads.

extern crate csv as csv_crate;

pub mod batch;
pub mod csv;
pub mod error;
pub mod record;
pub mod registry;
pub mod ris;
pub mod transaction;
mod utils;
mod validate;

// Reexports
pub use batch::{BatchResult, Records, open_records, process_file, run};
pub use csv::{CsvConfig, CsvReader};
pub use error::{InputError, RecordError, RegistryError, Result, RowError, TranslationGap};
pub use record::{RawRecord, SourceFormat, ValidatedRecord, field};
pub use registry::{LabelNamespace, RequestCategory, Template, TypeEntry, TypeMapping, TypeRegistry};
pub use ris::RisReader;
pub use transaction::{
    RunContext, RunMode, Transaction, build, build_with_gaps, check_submittable,
};
pub use validate::validate;
