//! Text normalization helpers
//!
//! Every extractor normalizes text before comparing or storing it. Listing
//! pages are full of non-breaking spaces and ragged indentation, so raw node
//! text is never compared directly.

/// Collapses a raw text fragment into a canonical form.
///
/// Replaces non-breaking spaces with ordinary spaces, collapses any run of
/// whitespace to a single space, and trims the ends. Pure and total.
pub fn normalize(raw: &str) -> String {
    raw.replace('\u{a0}', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reduces a field value to its digits, or the `-` sentinel.
///
/// Used by the optional numeric fields (surface, room counts): a missing or
/// unparseable value degrades to `-` instead of failing the record.
pub fn digits_or_dash(raw: &str) -> String {
    let v = normalize(raw);
    if v.is_empty() || v == "-" {
        return "-".to_string();
    }
    let digits: String = v.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        "-".to_string()
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_nbsp() {
        assert_eq!(normalize("250\u{a0}000"), "250 000");
    }

    #[test]
    fn test_normalize_collapses_runs() {
        assert_eq!(normalize("  a \t b\n\n c  "), "a b c");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_digits_or_dash_extracts_digits() {
        assert_eq!(digits_or_dash("85 m²"), "85");
        assert_eq!(digits_or_dash("250\u{a0}000 €"), "250000");
    }

    #[test]
    fn test_digits_or_dash_sentinel_passthrough() {
        assert_eq!(digits_or_dash("-"), "-");
        assert_eq!(digits_or_dash("  "), "-");
    }

    #[test]
    fn test_digits_or_dash_no_digits() {
        assert_eq!(digits_or_dash("aucune"), "-");
    }
}
