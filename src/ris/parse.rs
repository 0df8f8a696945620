//! RIS line parsing.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ris::tags::RisTag;

/// `TAG  - value`, tolerating a missing value (`ER  -`) and a single space
/// before the hyphen.
static TAG_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z][A-Z0-9]) {1,2}-(?:\s+(.*))?$").unwrap());

/// Parse a single trimmed RIS line into a tag and its content.
///
/// Returns `None` for lines that are not tag lines.
pub(crate) fn parse_ris_line(line: &str) -> Option<(RisTag, String)> {
    let captures = TAG_LINE.captures(line)?;
    let tag = RisTag::from_tag(&captures[1]);
    let content = captures
        .get(2)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();
    Some((tag, content))
}

/// Check if a line is export metadata that should be ignored.
pub(crate) fn is_metadata_line(line: &str) -> bool {
    line.starts_with("Record #")
        || line.starts_with("Provider:")
        || line.starts_with("Content:")
        || line.starts_with("Database:")
}
