//! ISBN kind classification and canonical hyphenation
//!
//! Checksum parsing and the registration-group range table are delegated
//! to the `isbn` crate; this module only decides what a stored value
//! means for the sweep: leave it, rewrite it, or report it.

use std::fmt;

use isbn::{Isbn10, Isbn13};

/// The two stored ISBN formats, each behind its own Wikidata property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IsbnKind {
    Isbn10,
    Isbn13,
}

impl IsbnKind {
    pub fn label(&self) -> &'static str {
        match self {
            IsbnKind::Isbn10 => "ISBN-10",
            IsbnKind::Isbn13 => "ISBN-13",
        }
    }
}

impl fmt::Display for IsbnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of classifying one stored value against its expected kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Stored value already carries the canonical hyphenation.
    Canonical,
    /// Valid but mis-hyphenated; carries the replacement value.
    Rehyphenate { canonical: String },
    /// Fails the checksum or length test for the expected kind.
    Invalid,
    /// Checksum-valid, but no canonical form can be derived: the stored
    /// shape fails the digit guard, or the registrant range is unknown
    /// to the hyphenation table. Left untouched and never reported.
    Unfixable,
}

/// Expected-kind validity predicate.
///
/// Spaces are tolerated as separators for validation, so a
/// space-separated value counts as valid even though only hyphenated or
/// bare forms are ever rewritten. A 13-digit value is never a valid
/// ISBN-10 and vice versa; the two parsers reject each other's lengths.
pub fn matches_kind(kind: IsbnKind, raw: &str) -> bool {
    let compact: String = raw.chars().filter(|c| *c != ' ').collect();
    match kind {
        IsbnKind::Isbn10 => compact.parse::<Isbn10>().is_ok(),
        IsbnKind::Isbn13 => compact.parse::<Isbn13>().is_ok(),
    }
}

/// Canonical hyphenated form of a valid ISBN, or `None` when the digit
/// guard or the range table rejects the value.
pub fn canonicalize(kind: IsbnKind, raw: &str) -> Option<String> {
    if !digit_shape_ok(kind, raw) {
        return None;
    }
    match kind {
        IsbnKind::Isbn10 => raw
            .parse::<Isbn10>()
            .ok()?
            .hyphenate()
            .ok()
            .map(|s| s.to_string()),
        IsbnKind::Isbn13 => raw
            .parse::<Isbn13>()
            .ok()?
            .hyphenate()
            .ok()
            .map(|s| s.to_string()),
    }
}

pub fn classify(kind: IsbnKind, raw: &str) -> Classification {
    if !matches_kind(kind, raw) {
        return Classification::Invalid;
    }
    match canonicalize(kind, raw) {
        Some(canonical) if canonical == raw => Classification::Canonical,
        Some(canonical) => Classification::Rehyphenate { canonical },
        None => Classification::Unfixable,
    }
}

/// Guard applied before re-hyphenation: only ASCII digits and hyphens,
/// plus a trailing X check digit for ISBN-10. Values that are valid but
/// use other separators (spaces, dots) are left as stored.
fn digit_shape_ok(kind: IsbnKind, raw: &str) -> bool {
    let body = match kind {
        IsbnKind::Isbn10 => raw.strip_suffix(&['X', 'x'][..]).unwrap_or(raw),
        IsbnKind::Isbn13 => raw,
    };
    !raw.is_empty() && body.chars().all(|c| c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_kind_valid() {
        assert!(matches_kind(IsbnKind::Isbn10, "0306406152"));
        assert!(matches_kind(IsbnKind::Isbn10, "0-306-40615-2"));
        assert!(matches_kind(IsbnKind::Isbn10, "080442957X"));
        assert!(matches_kind(IsbnKind::Isbn13, "9780306406157"));
        assert!(matches_kind(IsbnKind::Isbn13, "978-0-321-12521-7"));
        assert!(matches_kind(IsbnKind::Isbn10, "0 306 40615 2"));
    }

    #[test]
    fn test_matches_kind_invalid() {
        assert!(!matches_kind(IsbnKind::Isbn10, "0306406151")); // Bad checksum
        assert!(!matches_kind(IsbnKind::Isbn13, "9780306406155")); // Bad checksum
        assert!(!matches_kind(IsbnKind::Isbn13, "12345")); // Too short
        assert!(!matches_kind(IsbnKind::Isbn10, "not an isbn"));
    }

    #[test]
    fn test_kinds_reject_each_other() {
        assert!(!matches_kind(IsbnKind::Isbn10, "9780306406157"));
        assert!(!matches_kind(IsbnKind::Isbn13, "0306406152"));
    }

    #[test]
    fn test_canonicalize() {
        assert_eq!(
            canonicalize(IsbnKind::Isbn13, "9780000000002").as_deref(),
            Some("978-0-00-000000-2")
        );
        assert_eq!(
            canonicalize(IsbnKind::Isbn13, "9780306406157").as_deref(),
            Some("978-0-306-40615-7")
        );
        assert_eq!(
            canonicalize(IsbnKind::Isbn10, "0306406152").as_deref(),
            Some("0-306-40615-2")
        );
    }

    #[test]
    fn test_canonicalize_is_idempotent() {
        for (kind, raw) in [
            (IsbnKind::Isbn13, "9780000000002"),
            (IsbnKind::Isbn13, "978-0-306-40615-7"),
            (IsbnKind::Isbn10, "0306406152"),
        ] {
            let once = canonicalize(kind, raw).unwrap();
            let twice = canonicalize(kind, &once).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_digit_guard_rejects_other_separators() {
        assert_eq!(canonicalize(IsbnKind::Isbn10, "0 306 40615 2"), None);
        assert_eq!(canonicalize(IsbnKind::Isbn13, "978 0 306 40615 7"), None);
    }

    #[test]
    fn test_classify_canonical() {
        assert_eq!(
            classify(IsbnKind::Isbn13, "978-0-00-000000-2"),
            Classification::Canonical
        );
    }

    #[test]
    fn test_classify_rehyphenate() {
        assert_eq!(
            classify(IsbnKind::Isbn13, "9780000000002"),
            Classification::Rehyphenate {
                canonical: "978-0-00-000000-2".to_string()
            }
        );
    }

    #[test]
    fn test_classify_invalid() {
        assert_eq!(
            classify(IsbnKind::Isbn13, "9780306406155"),
            Classification::Invalid
        );
        assert_eq!(classify(IsbnKind::Isbn10, "12345"), Classification::Invalid);
    }

    #[test]
    fn test_classify_valid_but_space_separated() {
        assert_eq!(
            classify(IsbnKind::Isbn10, "0 306 40615 2"),
            Classification::Unfixable
        );
    }
}
