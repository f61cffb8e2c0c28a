//! Wiki-markup rendering of the invalid-ISBN report

use crate::classify::IsbnKind;
use crate::types::ErrorEntry;

/// Render one kind's section: a header plus one list item per entry,
/// sorted ascending by (qid, value) so repeated runs over the same data
/// produce identical text. Empty kinds render nothing.
pub fn render_section(kind: IsbnKind, entries: &[ErrorEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let mut sorted: Vec<&ErrorEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| a.qid.cmp(&b.qid).then_with(|| a.value.cmp(&b.value)));

    let mut text = format!("== Wrong {}s ==\n", kind.label());
    for entry in sorted {
        text.push_str(&format!("# {{{{Q|{}}}}}: {}\n", entry.qid, entry.value));
    }
    text
}

/// Render the full report. Kinds with no errors contribute no section;
/// non-empty sections are separated by a blank line.
pub fn render_report(sections: &[(IsbnKind, Vec<ErrorEntry>)]) -> String {
    sections
        .iter()
        .filter(|(_, entries)| !entries.is_empty())
        .map(|(kind, entries)| render_section(*kind, entries))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_section_renders_nothing() {
        assert_eq!(render_section(IsbnKind::Isbn13, &[]), "");
        assert_eq!(render_report(&[(IsbnKind::Isbn13, vec![])]), "");
    }

    #[test]
    fn test_section_sorted_by_qid() {
        let entries = vec![
            ErrorEntry::new("Q99", "123"),
            ErrorEntry::new("Q11", "456"),
        ];
        let text = render_section(IsbnKind::Isbn13, &entries);
        assert_eq!(
            text,
            "== Wrong ISBN-13s ==\n# {{Q|Q11}}: 456\n# {{Q|Q99}}: 123\n"
        );
    }

    #[test]
    fn test_one_header_for_two_entries() {
        let entries = vec![
            ErrorEntry::new("Q2", "b"),
            ErrorEntry::new("Q1", "a"),
        ];
        let text = render_section(IsbnKind::Isbn10, &entries);
        assert_eq!(text.matches("== Wrong ISBN-10s ==").count(), 1);
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_report_skips_empty_kind() {
        let sections = vec![
            (IsbnKind::Isbn13, vec![]),
            (IsbnKind::Isbn10, vec![ErrorEntry::new("Q5", "12345")]),
        ];
        let text = render_report(&sections);
        assert!(!text.contains("ISBN-13"));
        assert_eq!(text, "== Wrong ISBN-10s ==\n# {{Q|Q5}}: 12345\n");
    }

    #[test]
    fn test_report_separates_sections_with_blank_line() {
        let sections = vec![
            (IsbnKind::Isbn13, vec![ErrorEntry::new("Q1", "x")]),
            (IsbnKind::Isbn10, vec![ErrorEntry::new("Q2", "y")]),
        ];
        let text = render_report(&sections);
        assert_eq!(
            text,
            "== Wrong ISBN-13s ==\n# {{Q|Q1}}: x\n\n== Wrong ISBN-10s ==\n# {{Q|Q2}}: y\n"
        );
    }
}
