//! Required-field validation.
//!
//! The required-field set comes from the resolved [`TypeMapping`]; this module
//! holds no per-type rules of its own.

use crate::error::RecordError;
use crate::record::{RawRecord, ValidatedRecord};
use crate::registry::TypeMapping;

/// Checks that `record` carries every field `mapping` requires.
///
/// A value that is empty after trimming counts as missing. All missing
/// fields are reported together, in the mapping's required order.
///
/// # Errors
///
/// Returns [`RecordError::MissingRequiredFields`] listing every missing field.
///
/// ```
/// use bulk_ill::{RawRecord, RecordError, SourceFormat, TypeRegistry, validate};
///
/// let mapping = TypeRegistry::builtin().resolve("journalArticle").unwrap();
/// let record = RawRecord::new(2, "journalArticle", SourceFormat::Csv).with_field("Title", "Foo");
///
/// let error = validate(record, &mapping).unwrap_err();
/// assert_eq!(
///     error,
///     RecordError::MissingRequiredFields {
///         fields: vec![
///             "Publication Title".to_string(),
///             "Author".to_string(),
///             "Publication Year".to_string(),
///         ],
///     }
/// );
/// ```
pub fn validate(
    record: RawRecord,
    mapping: &TypeMapping<'_>,
) -> Result<ValidatedRecord, RecordError> {
    let missing: Vec<String> = mapping
        .required_fields()
        .iter()
        .filter(|name| !record.has_value(name))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(ValidatedRecord::new(record))
    } else {
        Err(RecordError::MissingRequiredFields { fields: missing })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SourceFormat;
    use crate::registry::TypeRegistry;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn book() -> RawRecord {
        RawRecord::new(2, "book", SourceFormat::Csv)
            .with_field("Title", "Foo")
            .with_field("Author", "Bar")
            .with_field("Publication Year", "2020")
    }

    #[test]
    fn test_complete_record_passes() {
        let mapping = TypeRegistry::builtin().resolve("book").unwrap();
        let validated = validate(book(), &mapping).unwrap();
        assert_eq!(validated.row(), 2);
        assert_eq!(validated.value("Author"), Some("Bar"));
    }

    #[rstest]
    #[case(&[], vec![])]
    #[case(&["Title"], vec!["Title"])]
    #[case(&["Author", "Title"], vec!["Title", "Author"])]
    #[case(&["Publication Year", "Title", "Author"], vec!["Title", "Author", "Publication Year"])]
    fn test_reports_exactly_the_missing_fields(
        #[case] blanked: &[&str],
        #[case] expected: Vec<&str>,
    ) {
        let mut record = book();
        for (name, value) in record.fields.iter_mut() {
            if blanked.contains(&name.as_str()) {
                *value = "  ".to_string();
            }
        }

        let mapping = TypeRegistry::builtin().resolve("book").unwrap();
        match validate(record, &mapping) {
            Ok(_) => assert!(expected.is_empty()),
            Err(RecordError::MissingRequiredFields { fields }) => assert_eq!(fields, expected),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_ris_journal_needs_title_and_author_only() {
        let mapping = TypeRegistry::builtin().resolve("JOUR").unwrap();
        let record = RawRecord::new(1, "JOUR", SourceFormat::Ris)
            .with_field("Author", "Smith, J.; Doe, A.")
            .with_field("Title", "Study");
        assert!(validate(record, &mapping).is_ok());

        let untitled = RawRecord::new(2, "JOUR", SourceFormat::Ris).with_field("Author", "Smith, J.");
        assert_eq!(
            validate(untitled, &mapping).unwrap_err(),
            RecordError::MissingRequiredFields {
                fields: vec!["Title".to_string()]
            }
        );
    }

    #[test]
    fn test_absent_and_empty_are_both_missing() {
        let mapping = TypeRegistry::builtin().resolve("bookSection").unwrap();
        let record = RawRecord::new(5, "bookSection", SourceFormat::Csv)
            .with_field("Title", "Chapter")
            .with_field("Publication Title", "")
            .with_field("Author", "A. Writer");
        assert_eq!(
            validate(record, &mapping).unwrap_err(),
            RecordError::MissingRequiredFields {
                fields: vec!["Publication Title".to_string(), "Publication Year".to_string()]
            }
        );
    }
}
