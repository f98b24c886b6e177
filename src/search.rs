//! Find-all
//!
//! Tags every occurrence of a needle with `Tag::Match`. Previous matches are
//! always cleared first, so only the latest search is ever visible. Matches
//! do not overlap: scanning resumes at the end of the previous match. Each
//! line is scanned once, so a pass is linear in the document size.

use tracing::debug;

use crate::buffer::{Mark, TextBuffer};
use crate::position::{Position, Span};
use crate::syntax::Tag;

/// Outcome of a find-all pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindAllReport {
    /// The needle searched for
    pub needle: String,
    /// Whether case was ignored
    pub ignore_case: bool,
    /// Number of matches tagged
    pub count: usize,
}

impl FindAllReport {
    /// User-facing summary
    pub fn message(&self) -> String {
        match self.count {
            1 => "1 match found".to_string(),
            n => format!("{} matches found", n),
        }
    }
}

/// Remove every match tag from the buffer
pub fn clear_matches<B: TextBuffer>(buf: &mut B) {
    let end = buf.index_of(Mark::End);
    buf.tag_remove(Tag::Match, Position::start(), end);
}

/// Tag every non-overlapping occurrence of `needle` and count them
pub fn find_all<B: TextBuffer>(buf: &mut B, needle: &str, ignore_case: bool) -> FindAllReport {
    clear_matches(buf);

    let mut report = FindAllReport {
        needle: needle.to_string(),
        ignore_case,
        count: 0,
    };
    if needle.is_empty() {
        return report;
    }

    // jump to the next line holding a match, then take that whole line in
    // one pass
    let len = needle.chars().count();
    let mut from = Position::start();
    while let Some(hit) = buf.search(needle, from, ignore_case) {
        let spans: Vec<(Span, Tag)> = buf
            .line_matches(hit.line, needle, ignore_case)
            .into_iter()
            .map(|column| (Span::new(hit.line, column, column + len), Tag::Match))
            .collect();
        report.count += spans.len();
        buf.extend_line_tags(hit.line, &spans);
        from = Position::line_start(hit.line + 1);
    }

    debug!(needle, ignore_case, count = report.count, "find all");
    report
}
