// SPDX-License-Identifier: MIT

//! Portfolio document layout.
//!
//! Turns a student's activities into fixed-size pages of [`PdfLine`]s:
//! word-wrapped description text, a heading per activity, and page breaks
//! when a page fills up.

use crate::services::pdf::{LineStyle, PdfLine};
use crate::time_utils::format_display_date;

/// Wrap width in characters, sized for 11pt Helvetica inside the margins.
const WRAP_WIDTH: usize = 88;

/// Page capacity in layout units (one unit per body line).
const PAGE_CAPACITY: usize = 40;

/// Minimum room required to start a new entry on the current page, so a
/// heading is never orphaned at the bottom.
const ENTRY_MIN_ROOM: usize = 4;

/// One activity as it appears in the exported document.
#[derive(Debug, Clone)]
pub struct PortfolioEntry {
    pub title: String,
    pub description: Option<String>,
    /// Submission timestamp (RFC3339)
    pub created_at: String,
}

fn style_cost(style: LineStyle) -> usize {
    match style {
        LineStyle::Title => 3,
        LineStyle::Heading => 2,
        LineStyle::Body | LineStyle::Small | LineStyle::Blank => 1,
    }
}

/// Greedy word wrap measured in characters, so non-ASCII text never
/// splits mid-character. Words longer than `width` are hard-split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for word in text.split_whitespace() {
        let mut word = word;
        let mut word_chars = word.chars().count();

        // Hard-split oversized words so a single token cannot overflow a line.
        while word_chars > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_chars = 0;
            }
            let cut = word
                .char_indices()
                .nth(width)
                .map(|(i, _)| i)
                .unwrap_or(word.len());
            let (head, tail) = word.split_at(cut);
            lines.push(head.to_string());
            word = tail;
            word_chars -= width;
        }

        if current.is_empty() {
            current.push_str(word);
            current_chars = word_chars;
        } else if current_chars + 1 + word_chars <= width {
            current.push(' ');
            current.push_str(word);
            current_chars += 1 + word_chars;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_chars = word_chars;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Lay out the document: a header page section followed by one block per
/// entry, breaking onto new pages as capacity runs out.
pub fn layout_document(student_name: &str, entries: &[PortfolioEntry]) -> Vec<Vec<PdfLine>> {
    let mut pages: Vec<Vec<PdfLine>> = Vec::new();
    let mut page: Vec<PdfLine> = Vec::new();
    let mut used = 0usize;

    let mut push_line = |pages: &mut Vec<Vec<PdfLine>>,
                         page: &mut Vec<PdfLine>,
                         used: &mut usize,
                         line: PdfLine| {
        let cost = style_cost(line.style);
        if *used + cost > PAGE_CAPACITY && !page.is_empty() {
            pages.push(std::mem::take(page));
            *used = 0;
        }
        *used += cost;
        page.push(line);
    };

    push_line(
        &mut pages,
        &mut page,
        &mut used,
        PdfLine::new(student_name, LineStyle::Title),
    );
    push_line(
        &mut pages,
        &mut page,
        &mut used,
        PdfLine::new("Digital Resume & Achievements", LineStyle::Small),
    );
    push_line(&mut pages, &mut page, &mut used, PdfLine::blank());

    if entries.is_empty() {
        push_line(
            &mut pages,
            &mut page,
            &mut used,
            PdfLine::new("No achievements yet.", LineStyle::Body),
        );
    }

    for entry in entries {
        // Break early rather than orphan a heading at the page bottom.
        if used + ENTRY_MIN_ROOM > PAGE_CAPACITY && !page.is_empty() {
            pages.push(std::mem::take(&mut page));
            used = 0;
        }

        push_line(
            &mut pages,
            &mut page,
            &mut used,
            PdfLine::new(entry.title.clone(), LineStyle::Heading),
        );
        push_line(
            &mut pages,
            &mut page,
            &mut used,
            PdfLine::new(format_display_date(&entry.created_at), LineStyle::Small),
        );

        if let Some(description) = &entry.description {
            for line in wrap_text(description, WRAP_WIDTH) {
                push_line(
                    &mut pages,
                    &mut page,
                    &mut used,
                    PdfLine::new(line, LineStyle::Body),
                );
            }
        }

        push_line(&mut pages, &mut page, &mut used, PdfLine::blank());
    }

    if !page.is_empty() {
        pages.push(page);
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, description: &str) -> PortfolioEntry {
        PortfolioEntry {
            title: title.to_string(),
            description: Some(description.to_string()),
            created_at: "2026-03-01T12:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_wrap_text_basic() {
        let lines = wrap_text("the quick brown fox jumps over the lazy dog", 15);
        assert_eq!(lines, vec!["the quick brown", "fox jumps over", "the lazy dog"]);
    }

    #[test]
    fn test_wrap_text_hard_splits_long_words() {
        let lines = wrap_text("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_text_empty() {
        assert!(wrap_text("   ", 10).is_empty());
    }

    #[test]
    fn test_wrap_text_counts_characters_not_bytes() {
        // A run of CJK characters is one unbroken word; splitting must
        // land on character boundaries.
        let lines = wrap_text(&"あ".repeat(10), 4);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "あ".repeat(4));
        assert_eq!(lines[1], "あ".repeat(4));
        assert_eq!(lines[2], "あ".repeat(2));

        // Well inside the description limit but over a line in bytes.
        let long = "ありがとう".repeat(30);
        for line in wrap_text(&long, WRAP_WIDTH) {
            assert!(line.chars().count() <= WRAP_WIDTH);
        }
    }

    #[test]
    fn test_layout_empty_portfolio_single_page() {
        let pages = layout_document("Sam Doe", &[]);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0][0].text, "Sam Doe");
        assert!(pages[0].iter().any(|l| l.text == "No achievements yet."));
    }

    #[test]
    fn test_layout_breaks_long_portfolios_across_pages() {
        let long_description = "word ".repeat(400);
        let entries: Vec<PortfolioEntry> = (0..6)
            .map(|i| entry(&format!("Achievement {}", i), &long_description))
            .collect();

        let pages = layout_document("Sam Doe", &entries);
        assert!(pages.len() > 1, "expected multiple pages");

        // Every entry heading appears exactly once across all pages.
        let headings: usize = pages
            .iter()
            .flatten()
            .filter(|l| l.style == LineStyle::Heading)
            .count();
        assert_eq!(headings, 6);
    }

    #[test]
    fn test_layout_never_orphans_a_heading() {
        let entries: Vec<PortfolioEntry> =
            (0..30).map(|i| entry(&format!("A{}", i), "short")).collect();
        let pages = layout_document("Sam Doe", &entries);

        for page in &pages {
            if let Some(last) = page.last() {
                assert_ne!(last.style, LineStyle::Heading, "heading orphaned at page end");
            }
        }
    }
}
