//! The built-in citation-type table.

use super::{RequestCategory, Template, TypeEntry};

/// template, request category, document category, RIS codes, manager item types
const BUILTIN_TYPES: &[(Template, RequestCategory, &str, &[&str], &[&str])] = &[
    (
        Template::JOUR,
        RequestCategory::Article,
        "Article",
        &["JOUR", "EJOUR", "MGZN", "NEWS", "ENCYC"],
        &[
            "journalArticle",
            "magazineArticle",
            "newspaperArticle",
            "encyclopediaArticle",
        ],
    ),
    (
        Template::CHAP,
        RequestCategory::Article,
        "Book Chapter",
        &["CHAP"],
        &["bookSection"],
    ),
    (
        Template::BOOK,
        RequestCategory::Loan,
        "Book",
        &["BOOK", "EBOOK"],
        &["book"],
    ),
    (
        Template::THES,
        RequestCategory::Loan,
        "Thesis",
        &["THES"],
        &["thesis"],
    ),
    (
        Template::CONF,
        RequestCategory::Article,
        "Conference Paper",
        &["CONF", "CPAPER"],
        &["conferencePaper"],
    ),
];

pub(super) fn entries() -> Vec<TypeEntry> {
    BUILTIN_TYPES
        .iter()
        .map(|(template, request_category, doc_category, ris, manager)| TypeEntry {
            template: *template,
            request_category: *request_category,
            doc_category: doc_category.to_string(),
            ris_types: ris.iter().map(|s| s.to_string()).collect(),
            manager_types: manager.iter().map(|s| s.to_string()).collect(),
        })
        .collect()
}
