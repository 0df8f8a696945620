//! Citation-type registry.
//!
//! Maps a raw citation-type label to the request schema it should be filed
//! under. Both RIS `TY` codes and citation-manager item types are alias keys
//! into the same rows, so `CHAP` and `bookSection` resolve to one schema.
//!
//! # Example
//!
//! ```
//! use bulk_ill::{Template, TypeRegistry};
//!
//! let registry = TypeRegistry::builtin();
//! let mapping = registry.resolve("bookSection").unwrap();
//! assert_eq!(mapping.template(), Template::CHAP);
//! assert_eq!(registry.resolve("CHAP").unwrap().template(), Template::CHAP);
//! assert!(registry.resolve("magazine").is_none());
//! ```

mod builtin;
mod template;

pub use template::{LabelNamespace, RequestCategory, Template};
pub(crate) use template::COMMON_EQUIVALENTS;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::RegistryError;

static BUILTIN: Lazy<TypeRegistry> = Lazy::new(|| {
    TypeRegistry::from_entries(builtin::entries()).expect("built-in citation type table is valid")
});

/// One row of the citation-type table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeEntry {
    pub template: Template,
    pub request_category: RequestCategory,
    pub doc_category: String,
    /// RIS `TY` codes for this row.
    #[serde(default)]
    pub ris_types: Vec<String>,
    /// Citation-manager item types for this row.
    #[serde(default)]
    pub manager_types: Vec<String>,
}

#[derive(Deserialize)]
struct RegistryTable {
    types: Vec<TypeEntry>,
}

/// The resolved schema for one label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMapping<'a> {
    label: &'a str,
    namespace: LabelNamespace,
    entry: &'a TypeEntry,
}

impl<'a> TypeMapping<'a> {
    /// The label as stored in the registry.
    pub fn label(&self) -> &'a str {
        self.label
    }

    pub fn namespace(&self) -> LabelNamespace {
        self.namespace
    }

    pub fn template(&self) -> Template {
        self.entry.template
    }

    pub fn request_category(&self) -> RequestCategory {
        self.entry.request_category
    }

    pub fn doc_category(&self) -> &'a str {
        &self.entry.doc_category
    }

    /// Fields a record resolved through this label must carry.
    pub fn required_fields(&self) -> &'static [&'static str] {
        self.entry.template.required_fields(self.namespace)
    }
}

/// Immutable label → schema lookup table.
///
/// Built once and only read afterwards; safe to share between threads.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    entries: Vec<TypeEntry>,
    index: HashMap<String, (usize, LabelNamespace)>,
}

impl TypeRegistry {
    /// The built-in table, initialised on first use.
    pub fn builtin() -> &'static TypeRegistry {
        &BUILTIN
    }

    /// Builds a registry from table rows.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateLabel`] if any label appears twice across
    /// both namespaces, and [`RegistryError::NoAliases`] for a row that no label
    /// can reach.
    pub fn from_entries(entries: Vec<TypeEntry>) -> Result<Self, RegistryError> {
        let mut index = HashMap::new();

        for (position, entry) in entries.iter().enumerate() {
            if entry.ris_types.is_empty() && entry.manager_types.is_empty() {
                return Err(RegistryError::NoAliases {
                    template: entry.template,
                });
            }

            let aliases = entry
                .ris_types
                .iter()
                .map(|label| (label, LabelNamespace::Ris))
                .chain(
                    entry
                        .manager_types
                        .iter()
                        .map(|label| (label, LabelNamespace::Manager)),
                );

            for (label, namespace) in aliases {
                if index
                    .insert(label.clone(), (position, namespace))
                    .is_some()
                {
                    return Err(RegistryError::DuplicateLabel {
                        label: label.clone(),
                    });
                }
            }
        }

        Ok(Self { entries, index })
    }

    /// Loads a registry from a TOML document with a `[[types]]` array.
    ///
    /// ```
    /// use bulk_ill::{Template, TypeRegistry};
    ///
    /// let registry = TypeRegistry::from_toml_str(r#"
    /// [[types]]
    /// template = "JOUR"
    /// request_category = "Article"
    /// doc_category = "Article"
    /// ris_types = ["JOUR"]
    /// manager_types = ["journalArticle"]
    /// "#).unwrap();
    /// assert_eq!(registry.resolve("JOUR").unwrap().template(), Template::JOUR);
    /// ```
    pub fn from_toml_str(input: &str) -> Result<Self, RegistryError> {
        let table: RegistryTable = toml::from_str(input)?;
        Self::from_entries(table.types)
    }

    /// Exact, case-sensitive lookup of a raw label.
    pub fn resolve(&self, label: &str) -> Option<TypeMapping<'_>> {
        let (label, (position, namespace)) = self.index.get_key_value(label)?;
        Some(TypeMapping {
            label,
            namespace: *namespace,
            entry: &self.entries[*position],
        })
    }

    /// Fields required for records of the given mapping.
    pub fn required_fields(&self, mapping: &TypeMapping<'_>) -> &'static [&'static str] {
        mapping.required_fields()
    }

    pub fn entries(&self) -> &[TypeEntry] {
        &self.entries
    }

    /// Number of distinct labels across both namespaces.
    pub fn label_count(&self) -> usize {
        self.index.len()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        BUILTIN.clone()
    }
}
