//! Transaction building.
//!
//! Turns a validated record into the flat key/value request the backend
//! accepts. Building is pure: everything run-wide comes in through
//! [`RunContext`].

use itertools::Itertools;
use serde::ser::Serializer;
use serde::Serialize;
use std::fmt;

use crate::error::{RecordError, TranslationGap};
use crate::record::ValidatedRecord;
use crate::registry::{COMMON_EQUIVALENTS, RequestCategory, Template, TypeMapping};

/// Backend key for the requester identity.
pub const REQUESTER_KEY: &str = "ExternalUserId";
/// Backend key for the pickup location.
pub const PICKUP_KEY: &str = "ItemInfo4";
const REQUEST_TYPE_KEY: &str = "RequestType";
const PROCESS_TYPE_KEY: &str = "ProcessType";
const DOCUMENT_TYPE_KEY: &str = "DocumentType";
const PROCESS_TYPE: &str = "Borrowing";

/// What happens to a batch once it is built.
///
/// The pipeline behaves identically in every mode; only the collaborator that
/// receives the result looks at it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum RunMode {
    /// Review only, nothing is submitted.
    #[default]
    Test,
    /// Submit to a development backend.
    Dev,
    /// Submit to the production backend.
    Live,
}

impl RunMode {
    /// Whether built transactions go to the production backend.
    pub fn submits(&self) -> bool {
        matches!(self, RunMode::Live)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Test => "test",
            RunMode::Dev => "dev",
            RunMode::Live => "live",
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run-wide values every transaction is stamped with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunContext {
    pub requester_email: String,
    pub pickup_location: String,
    pub mode: RunMode,
}

impl RunContext {
    pub fn new(requester_email: impl Into<String>, pickup_location: impl Into<String>) -> Self {
        Self {
            requester_email: requester_email.into(),
            pickup_location: pickup_location.into(),
            mode: RunMode::default(),
        }
    }

    pub fn with_requester_email(mut self, email: impl Into<String>) -> Self {
        self.requester_email = email.into();
        self
    }

    pub fn with_pickup_location(mut self, location: impl Into<String>) -> Self {
        self.pickup_location = location.into();
        self
    }

    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }
}

/// One backend request, built from one input record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    row: usize,
    template: Template,
    request_category: RequestCategory,
    #[serde(serialize_with = "serialize_fields")]
    fields: Vec<(String, String)>,
}

fn serialize_fields<S>(fields: &[(String, String)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(fields.iter().map(|(key, value)| (key, value)))
}

impl Transaction {
    /// Row or record ordinal the transaction was built from.
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn template(&self) -> Template {
        self.template
    }

    pub fn request_category(&self) -> RequestCategory {
        self.request_category
    }

    /// Backend key/value pairs in emission order.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    fn set(&mut self, key: &str, value: &str) {
        self.fields.push((key.to_string(), value.trim().to_string()));
    }

    fn has_key(&self, key: &str) -> bool {
        self.fields.iter().any(|(name, _)| name == key)
    }
}

/// Builds the transaction for a validated record.
///
/// Input fields that do not reach the transaction are dropped; use
/// [`build_with_gaps`] to learn which.
pub fn build(record: &ValidatedRecord, mapping: &TypeMapping<'_>, ctx: &RunContext) -> Transaction {
    build_with_gaps(record, mapping, ctx).0
}

/// Builds the transaction and reports the input fields that were dropped.
///
/// A field is dropped when it has no backend equivalent, or when a
/// higher-priority field already filled the same backend key.
///
/// ```
/// use bulk_ill::{RawRecord, RunContext, SourceFormat, TypeRegistry, build_with_gaps, validate};
///
/// let mapping = TypeRegistry::builtin().resolve("book").unwrap();
/// let record = RawRecord::new(2, "book", SourceFormat::Csv)
///     .with_field("Title", "Foo")
///     .with_field("Author", "Bar")
///     .with_field("Publication Year", "2020")
///     .with_field("Date Added", "2024-01-01");
/// let record = validate(record, &mapping).unwrap();
///
/// let ctx = RunContext::new("patron@example.edu", "Main Library");
/// let (transaction, gap) = build_with_gaps(&record, &mapping, &ctx);
/// assert_eq!(transaction.get("LoanTitle"), Some("Foo"));
/// assert_eq!(gap.unwrap().fields, vec!["Date Added".to_string()]);
/// ```
pub fn build_with_gaps(
    record: &ValidatedRecord,
    mapping: &TypeMapping<'_>,
    ctx: &RunContext,
) -> (Transaction, Option<TranslationGap>) {
    let mut transaction = Transaction {
        row: record.row(),
        template: mapping.template(),
        request_category: mapping.request_category(),
        fields: Vec::new(),
    };

    transaction.set(REQUESTER_KEY, &ctx.requester_email);
    transaction.set(PICKUP_KEY, &ctx.pickup_location);
    transaction.set(REQUEST_TYPE_KEY, mapping.request_category().as_str());
    transaction.set(PROCESS_TYPE_KEY, PROCESS_TYPE);
    transaction.set(DOCUMENT_TYPE_KEY, mapping.doc_category());

    let translations = mapping
        .template()
        .translations()
        .iter()
        .chain(COMMON_EQUIVALENTS.iter());

    let mut used: Vec<&str> = Vec::new();
    for (source, key) in translations {
        if transaction.has_key(key) {
            continue;
        }
        if let Some(value) = record.value(source) {
            transaction.set(key, value);
            used.push(*source);
        }
    }

    let dropped: Vec<String> = record
        .fields()
        .iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(name, _)| name)
        .filter(|name| !used.contains(&name.as_str()))
        .unique()
        .cloned()
        .collect();

    let gap = (!dropped.is_empty()).then(|| TranslationGap {
        row: record.row(),
        label: record.label().to_string(),
        fields: dropped,
    });

    (transaction, gap)
}

/// Checks the run-wide values a backend will insist on.
///
/// Every request needs a requester; loans also need somewhere to collect the
/// item.
///
/// # Errors
///
/// Returns [`RecordError::MissingRequiredFields`] naming `Requester Email`
/// and/or `Pickup Location`.
pub fn check_submittable(transaction: &Transaction) -> Result<(), RecordError> {
    let is_blank = |key: &str| transaction.get(key).is_none_or(str::is_empty);

    let mut missing = Vec::new();
    if is_blank(REQUESTER_KEY) {
        missing.push("Requester Email".to_string());
    }
    if transaction.request_category == RequestCategory::Loan && is_blank(PICKUP_KEY) {
        missing.push("Pickup Location".to_string());
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(RecordError::MissingRequiredFields { fields: missing })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{RawRecord, SourceFormat};
    use crate::registry::TypeRegistry;
    use crate::validate::validate;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn ctx() -> RunContext {
        RunContext::new("patron@example.edu", "Main Library")
    }

    fn built(record: RawRecord) -> (Transaction, Option<TranslationGap>) {
        let mapping = TypeRegistry::builtin().resolve(&record.label).unwrap();
        let record = validate(record, &mapping).unwrap();
        build_with_gaps(&record, &mapping, &ctx())
    }

    fn pairs(transaction: &Transaction) -> Vec<(&str, &str)> {
        transaction
            .fields()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn test_book_loan() {
        let record = RawRecord::new(2, "book", SourceFormat::Csv)
            .with_field("Title", "Foo")
            .with_field("Author", "Bar")
            .with_field("Publication Year", "2020")
            .with_field("ISBN", "9780000000000")
            .with_field("Publisher", "");

        let (transaction, gap) = built(record);
        assert_eq!(transaction.template(), Template::BOOK);
        assert_eq!(transaction.request_category(), RequestCategory::Loan);
        assert_eq!(transaction.row(), 2);
        assert_eq!(
            pairs(&transaction),
            vec![
                ("ExternalUserId", "patron@example.edu"),
                ("ItemInfo4", "Main Library"),
                ("RequestType", "Loan"),
                ("ProcessType", "Borrowing"),
                ("DocumentType", "Book"),
                ("LoanTitle", "Foo"),
                ("LoanAuthor", "Bar"),
                ("LoanDate", "2020"),
                ("ISSN", "9780000000000"),
            ]
        );
        assert_eq!(gap, None);
    }

    #[test]
    fn test_journal_article_from_ris() {
        let record = RawRecord::new(1, "JOUR", SourceFormat::Ris)
            .with_field("Author", "Smith, J.; Doe, A.")
            .with_field("Title", " Study ")
            .with_field("Publication Title", "Journal of Tests")
            .with_field("DOI", "10.1000/test")
            .with_field("KW", "testing");

        let (transaction, gap) = built(record);
        assert_eq!(transaction.get("RequestType"), Some("Article"));
        assert_eq!(transaction.get("PhotoArticleAuthor"), Some("Smith, J.; Doe, A."));
        assert_eq!(transaction.get("PhotoArticleTitle"), Some("Study"));
        assert_eq!(transaction.get("PhotoJournalTitle"), Some("Journal of Tests"));
        assert_eq!(transaction.get("DOI"), Some("10.1000/test"));
        assert_eq!(transaction.get("LoanTitle"), None);

        let gap = gap.unwrap();
        assert_eq!(gap.row, 1);
        assert_eq!(gap.label, "JOUR");
        assert_eq!(gap.fields, vec!["KW".to_string()]);
    }

    #[rstest]
    #[case("Conference Name", "Proceedings")]
    #[case("Publication Title", "Proceedings")]
    fn test_conference_container_title(#[case] source: &str, #[case] expected: &str) {
        let record = RawRecord::new(3, "conferencePaper", SourceFormat::Csv)
            .with_field("Title", "Talk")
            .with_field("Author", "Speaker")
            .with_field("Publication Year", "2019")
            .with_field(source, "Proceedings");

        let (transaction, gap) = built(record);
        assert_eq!(transaction.get("PhotoJournalTitle"), Some(expected));
        assert_eq!(transaction.get("DocumentType"), Some("Conference Paper"));
        assert_eq!(gap, None);
    }

    #[test]
    fn test_conference_name_wins_over_publication_title() {
        let record = RawRecord::new(3, "conferencePaper", SourceFormat::Csv)
            .with_field("Title", "Talk")
            .with_field("Author", "Speaker")
            .with_field("Publication Year", "2019")
            .with_field("Publication Title", "Series")
            .with_field("Conference Name", "Proceedings");

        let (transaction, gap) = built(record);
        assert_eq!(transaction.get("PhotoJournalTitle"), Some("Proceedings"));
        assert_eq!(gap.unwrap().fields, vec!["Publication Title".to_string()]);
        assert_eq!(
            transaction
                .fields()
                .iter()
                .filter(|(key, _)| key == "PhotoJournalTitle")
                .count(),
            1
        );
    }

    #[test]
    fn test_chapter_isbn_before_issn() {
        let record = RawRecord::new(4, "bookSection", SourceFormat::Csv)
            .with_field("Title", "Chapter")
            .with_field("Publication Title", "Edited Volume")
            .with_field("Author", "Writer")
            .with_field("Publication Year", "2001")
            .with_field("ISSN", "1234-5678")
            .with_field("ISBN", "978-1")
            .with_field("Pages", "10-20");

        let (transaction, gap) = built(record);
        assert_eq!(transaction.get("ISSN"), Some("978-1"));
        assert_eq!(gap.unwrap().fields, vec!["ISSN".to_string()]);
        assert_eq!(transaction.get("PhotoJournalInclusivePages"), Some("10-20"));
    }

    #[test]
    fn test_gap_fields_are_unique_and_ordered() {
        let record = RawRecord::new(2, "thesis", SourceFormat::Csv)
            .with_field("Key", "X1")
            .with_field("Title", "Dissertation")
            .with_field("Author", "Student")
            .with_field("Publication Year", "2010")
            .with_field("Key", "X2")
            .with_field("Notes", "  ")
            .with_field("Date Added", "2024");

        let (_, gap) = built(record);
        assert_eq!(
            gap.unwrap().fields,
            vec!["Key".to_string(), "Date Added".to_string()]
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let record = RawRecord::new(2, "journalArticle", SourceFormat::Csv)
            .with_field("Title", "Foo")
            .with_field("Publication Title", "Bar")
            .with_field("Author", "Baz")
            .with_field("Publication Year", "1999");
        assert_eq!(built(record.clone()), built(record));
    }

    #[rstest]
    #[case("book", "", "", vec!["Requester Email", "Pickup Location"])]
    #[case("book", "a@b.c", " ", vec!["Pickup Location"])]
    #[case("journalArticle", "a@b.c", "", vec![])]
    #[case("journalArticle", "", "Desk", vec!["Requester Email"])]
    fn test_check_submittable(
        #[case] label: &str,
        #[case] email: &str,
        #[case] pickup: &str,
        #[case] expected: Vec<&str>,
    ) {
        let mapping = TypeRegistry::builtin().resolve(label).unwrap();
        let record = RawRecord::new(2, label, SourceFormat::Csv)
            .with_field("Title", "Foo")
            .with_field("Publication Title", "Bar")
            .with_field("Author", "Baz")
            .with_field("Publication Year", "1999");
        let record = validate(record, &mapping).unwrap();
        let ctx = RunContext::default()
            .with_requester_email(email)
            .with_pickup_location(pickup)
            .with_mode(RunMode::Live);

        let transaction = build(&record, &mapping, &ctx);
        match check_submittable(&transaction) {
            Ok(()) => assert!(expected.is_empty()),
            Err(RecordError::MissingRequiredFields { fields }) => assert_eq!(fields, expected),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_run_mode() {
        assert!(!RunMode::Test.submits());
        assert!(!RunMode::Dev.submits());
        assert!(RunMode::Live.submits());
        assert_eq!(RunContext::default().mode, RunMode::Test);
        assert_eq!(RunMode::Dev.to_string(), "dev");
    }
}
