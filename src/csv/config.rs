/// Column that holds the citation type in citation-manager exports.
pub const DEFAULT_TYPE_COLUMN: &str = "Item Type";

/// Configuration for reading citation CSV exports.
///
/// # Examples
///
/// ```
/// use bulk_ill::CsvConfig;
///
/// let mut config = CsvConfig::new();
/// config.set_delimiter(b';').set_type_column("Type");
/// assert_eq!(config.type_column(), "Type");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvConfig {
    pub(crate) delimiter: u8,
    pub(crate) type_column: String,
    pub(crate) trim: bool,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvConfig {
    /// Comma-delimited, `Item Type` column, values trimmed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            type_column: DEFAULT_TYPE_COLUMN.to_string(),
            trim: true,
        }
    }

    pub fn set_delimiter(&mut self, delimiter: u8) -> &mut Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the header of the column holding the citation-type label.
    pub fn set_type_column(&mut self, column: impl Into<String>) -> &mut Self {
        self.type_column = column.into();
        self
    }

    /// Sets whether cell values are trimmed of surrounding whitespace.
    pub fn set_trim(&mut self, trim: bool) -> &mut Self {
        self.trim = trim;
        self
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    pub fn type_column(&self) -> &str {
        &self.type_column
    }
}
