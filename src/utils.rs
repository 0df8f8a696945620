/// Removes a leading UTF-8 byte order mark, which spreadsheet and
/// citation-manager exports commonly prepend.
pub(crate) fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

/// Joins a start and end page into one range.
///
/// Abbreviated end pages are completed from the start page, so `100` and `10`
/// become `100-110`. Ranges that cannot be interpreted are kept as written.
pub(crate) fn join_page_range(start: Option<&str>, end: Option<&str>) -> Option<String> {
    match (start, end) {
        (Some(start), Some(end)) => Some(complete_page_range(start, end)),
        (Some(start), None) => Some(start.to_string()),
        (None, Some(end)) => Some(end.to_string()),
        (None, None) => None,
    }
}

fn complete_page_range(from: &str, to: &str) -> String {
    let verbatim = || format!("{from}-{to}");

    let (from_prefix, Some(from_num)) = split_prefix_and_number(from) else {
        return verbatim();
    };
    let (to_prefix, Some(to_num)) = split_prefix_and_number(to) else {
        return verbatim();
    };

    if !to_prefix.is_empty() && to_prefix != from_prefix {
        return verbatim();
    }
    if !from_num.chars().all(|c| c.is_ascii_digit()) || !to_num.chars().all(|c| c.is_ascii_digit()) {
        return verbatim();
    }

    let completed_to = if to_num.len() < from_num.len() {
        format!("{}{}", &from_num[..from_num.len() - to_num.len()], to_num)
    } else {
        to_num.to_string()
    };

    if completed_to == from_num {
        format!("{from_prefix}{from_num}")
    } else {
        format!("{from_prefix}{from_num}-{from_prefix}{completed_to}")
    }
}

/// Splits `R575` into (`R`, `575`).
fn split_prefix_and_number(input: &str) -> (&str, Option<&str>) {
    match input.find(|c: char| c.is_ascii_digit()) {
        Some(index) => (&input[..index], Some(&input[index..])),
        None => (input, None),
    }
}

/// The year part of a RIS date such as `2023/12/25/Christmas edition` or `1998///`.
pub(crate) fn ris_year(date: &str) -> &str {
    date.split('/').next().unwrap_or(date).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("1234", "45", "1234-1245")]
    #[case("123", "456", "123-456")]
    #[case("R575", "82", "R575-R582")]
    #[case("12", "345", "12-345")]
    #[case("5", "10", "5-10")]
    #[case("A94", "A95", "A94-A95")]
    #[case("01", "Apr", "01-Apr")]
    #[case("101", "101", "101")]
    #[case("xii", "xiv", "xii-xiv")]
    fn test_join_page_range(#[case] start: &str, #[case] end: &str, #[case] expected: &str) {
        assert_eq!(
            join_page_range(Some(start), Some(end)),
            Some(expected.to_string())
        );
    }

    #[test]
    fn test_join_page_range_partial() {
        assert_eq!(join_page_range(Some("696"), None), Some("696".to_string()));
        assert_eq!(join_page_range(None, Some("700")), Some("700".to_string()));
        assert_eq!(join_page_range(None, None), None);
    }

    #[rstest]
    #[case("2023/12/25/Christmas edition", "2023")]
    #[case("1998///", "1998")]
    #[case("2020", "2020")]
    #[case("", "")]
    fn test_ris_year(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(ris_year(input), expected);
    }

    #[test]
    fn test_strip_bom() {
        assert_eq!(strip_bom("\u{feff}Key"), "Key");
        assert_eq!(strip_bom("Key"), "Key");
    }
}
