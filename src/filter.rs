//! Input filtering: deduplication and syntactic validation of candidate
//! addresses. No deliverability checking happens here.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$")
        .expect("Email shape regex failed to compile. This is a bug.")
});

/// Checks whether a candidate string is a syntactically plausible address.
///
/// RFC-shaped `local@domain` only: length limits, a single `@`, and
/// alphanumeric/hyphen domain labels with at least two labels. Whether the
/// mailbox actually exists is the backend's job.
pub fn is_valid_address(candidate: &str) -> bool {
    if candidate.len() > 254 || !EMAIL_SHAPE.is_match(candidate) {
        return false;
    }
    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > 64 {
        return false;
    }
    domain
        .split('.')
        .all(|label| !label.is_empty() && !label.starts_with('-') && !label.ends_with('-'))
}

/// Trims, deduplicates, and filters raw input lines down to the set of
/// distinct syntactically valid addresses. Invalid lines are silently
/// dropped; order is irrelevant.
pub fn filter_addresses<I>(lines: I) -> HashSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| line.as_ref().trim().to_string())
        .filter(|address| is_valid_address(address))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_collapse_to_one() {
        let set = filter_addresses(["a@example.com", "a@example.com", "a@example.com"]);
        assert_eq!(set.len(), 1);
        assert!(set.contains("a@example.com"));
    }

    #[test]
    fn lines_are_trimmed_before_dedup() {
        let set = filter_addresses(["a@example.com\n", "  a@example.com", "a@example.com\r\n"]);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn malformed_lines_are_silently_dropped() {
        let set = filter_addresses([
            "not-an-email",
            "two@@example.com",
            "@example.com",
            "user@",
            "user@nodot",
            "user@-bad.example.com",
            "user@bad-.example.com",
            "user@example..com",
            "",
            "   ",
        ]);
        assert!(set.is_empty());
    }

    #[test]
    fn mixed_input_keeps_only_valid() {
        let set = filter_addresses(["a@example.com", "not-an-email", "b.c+tag@sub.example.org"]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("a@example.com"));
        assert!(set.contains("b.c+tag@sub.example.org"));
    }

    #[test]
    fn local_part_length_is_bounded() {
        let long_local = format!("{}@example.com", "x".repeat(65));
        assert!(!is_valid_address(&long_local));
        let ok_local = format!("{}@example.com", "x".repeat(64));
        assert!(is_valid_address(&ok_local));
    }

    #[test]
    fn total_length_is_bounded() {
        let long = format!("user@{}.com", "d".repeat(250));
        assert!(!is_valid_address(&long));
    }
}
