//! Transaction templates and the field rules attached to them.
//!
//! A template is the backend's request schema. Everything that varies per
//! schema lives here as data: the fields a record must carry and how canonical
//! field names translate to backend keys.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::record::field;

/// Backend request schema identifier.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Template {
    /// Book loan
    BOOK,
    /// Journal article copy
    JOUR,
    /// Book chapter copy
    CHAP,
    /// Conference paper copy
    CONF,
    /// Thesis loan
    THES,
}

impl Template {
    pub fn as_str(&self) -> &'static str {
        match self {
            Template::BOOK => "BOOK",
            Template::JOUR => "JOUR",
            Template::CHAP => "CHAP",
            Template::CONF => "CONF",
            Template::THES => "THES",
        }
    }

    /// Fields a record must carry, in reporting order.
    ///
    /// Labels resolved through the citation-manager namespace require the full
    /// set; RIS labels only require the fields that identify the work.
    pub fn required_fields(&self, namespace: LabelNamespace) -> &'static [&'static str] {
        match (namespace, self) {
            (LabelNamespace::Ris, _) => &[field::TITLE, field::AUTHOR],
            (LabelNamespace::Manager, Template::JOUR | Template::CHAP) => &[
                field::TITLE,
                field::PUBLICATION_TITLE,
                field::AUTHOR,
                field::PUBLICATION_YEAR,
            ],
            (LabelNamespace::Manager, Template::BOOK | Template::THES | Template::CONF) => {
                &[field::TITLE, field::AUTHOR, field::PUBLICATION_YEAR]
            }
        }
    }

    /// Canonical field name to backend key, in priority order.
    ///
    /// When two entries target the same backend key the first one present in
    /// the record wins.
    pub fn translations(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Template::JOUR => ARTICLE_TRANSLATIONS,
            Template::CHAP => CHAPTER_TRANSLATIONS,
            Template::CONF => CONFERENCE_TRANSLATIONS,
            Template::BOOK | Template::THES => LOAN_TRANSLATIONS,
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backend request category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestCategory {
    /// The patron borrows a physical item.
    Loan,
    /// The lending library supplies a copy.
    Article,
}

impl RequestCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestCategory::Loan => "Loan",
            RequestCategory::Article => "Article",
        }
    }
}

impl fmt::Display for RequestCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which alias set a label was resolved through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LabelNamespace {
    /// Two to five letter RIS `TY` codes such as `JOUR`.
    Ris,
    /// Citation-manager item types such as `journalArticle`.
    Manager,
}

const ARTICLE_TRANSLATIONS: &[(&str, &str)] = &[
    (field::TITLE, "PhotoArticleTitle"),
    (field::AUTHOR, "PhotoArticleAuthor"),
    (field::PUBLICATION_TITLE, "PhotoJournalTitle"),
    (field::VOLUME, "PhotoJournalVolume"),
    (field::ISSUE, "PhotoJournalIssue"),
    (field::PUBLICATION_YEAR, "PhotoJournalYear"),
    (field::PAGES, "PhotoJournalInclusivePages"),
    (field::PUBLISHER, "PhotoItemPublisher"),
    (field::PLACE, "PhotoItemPlace"),
    (field::EDITION, "PhotoItemEdition"),
];

const CHAPTER_TRANSLATIONS: &[(&str, &str)] = &[
    (field::TITLE, "PhotoArticleTitle"),
    (field::AUTHOR, "PhotoArticleAuthor"),
    (field::PUBLICATION_TITLE, "PhotoJournalTitle"),
    (field::VOLUME, "PhotoJournalVolume"),
    (field::ISSUE, "PhotoJournalIssue"),
    (field::PUBLICATION_YEAR, "PhotoJournalYear"),
    (field::PAGES, "PhotoJournalInclusivePages"),
    (field::PUBLISHER, "PhotoItemPublisher"),
    (field::PLACE, "PhotoItemPlace"),
    (field::EDITION, "PhotoItemEdition"),
    (field::ISBN, "ISSN"),
];

const CONFERENCE_TRANSLATIONS: &[(&str, &str)] = &[
    (field::TITLE, "PhotoArticleTitle"),
    (field::AUTHOR, "PhotoArticleAuthor"),
    (field::CONFERENCE_NAME, "PhotoJournalTitle"),
    (field::PUBLICATION_TITLE, "PhotoJournalTitle"),
    (field::VOLUME, "PhotoJournalVolume"),
    (field::ISSUE, "PhotoJournalIssue"),
    (field::PUBLICATION_YEAR, "PhotoJournalYear"),
    (field::PAGES, "PhotoJournalInclusivePages"),
    (field::PUBLISHER, "PhotoItemPublisher"),
    (field::PLACE, "PhotoItemPlace"),
];

const LOAN_TRANSLATIONS: &[(&str, &str)] = &[
    (field::TITLE, "LoanTitle"),
    (field::AUTHOR, "LoanAuthor"),
    (field::PUBLICATION_YEAR, "LoanDate"),
    (field::PUBLISHER, "LoanPublisher"),
    (field::PLACE, "LoanPlace"),
    (field::EDITION, "LoanEdition"),
    (field::ISBN, "ISSN"),
];

/// Backend equivalents shared by every template, consulted after the
/// template's own table.
pub(crate) const COMMON_EQUIVALENTS: &[(&str, &str)] = &[
    (field::DOI, "DOI"),
    (field::ISSN, "ISSN"),
    (field::CALL_NUMBER, "CallNumber"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case(Template::JOUR, vec!["Title", "Publication Title", "Author", "Publication Year"])]
    #[case(Template::CHAP, vec!["Title", "Publication Title", "Author", "Publication Year"])]
    #[case(Template::BOOK, vec!["Title", "Author", "Publication Year"])]
    #[case(Template::THES, vec!["Title", "Author", "Publication Year"])]
    #[case(Template::CONF, vec!["Title", "Author", "Publication Year"])]
    fn test_manager_required_fields(#[case] template: Template, #[case] expected: Vec<&str>) {
        assert_eq!(template.required_fields(LabelNamespace::Manager), expected.as_slice());
    }

    #[test]
    fn test_ris_required_fields() {
        for template in [Template::BOOK, Template::JOUR, Template::THES] {
            assert_eq!(
                template.required_fields(LabelNamespace::Ris),
                &["Title", "Author"]
            );
        }
    }

    #[test]
    fn test_every_required_field_is_translated() {
        for template in [
            Template::BOOK,
            Template::JOUR,
            Template::CHAP,
            Template::CONF,
            Template::THES,
        ] {
            for required in template.required_fields(LabelNamespace::Manager) {
                assert!(
                    template.translations().iter().any(|(name, _)| name == required),
                    "{template} does not translate {required}"
                );
            }
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Template::CHAP.to_string(), "CHAP");
        assert_eq!(RequestCategory::Loan.to_string(), "Loan");
    }
}
