//! Incremental re-tagging
//!
//! The retagger decides how much of a buffer to re-tokenize. A keystroke
//! re-tags the line it touched; loads and pastes re-tag the whole document.
//! Re-tagging a line replaces every tag on it except the selection.

use tracing::{debug, trace};

use crate::buffer::TextBuffer;

use super::rules::RuleTable;
use super::tags::Tag;
use super::tokenizer::tokenize_line;

/// Applies the rule table to lines of a buffer
pub struct Retagger {
    table: RuleTable,
    /// Whether classification is applied at all
    pub enabled: bool,
}

impl Retagger {
    /// Create a retagger over a rule table
    pub fn new(table: RuleTable) -> Self {
        let names: Vec<&str> = table.rules().iter().map(|rule| rule.name).collect();
        debug!(rules = ?names, "rule table loaded");
        Self {
            table,
            enabled: true,
        }
    }

    /// Re-tag one line. Returns false (and does nothing) when the line
    /// does not exist.
    pub fn retag_line<B: TextBuffer>(&self, buf: &mut B, line: usize) -> bool {
        let Some(text) = buf.line_text(line) else {
            return false;
        };
        let spans = if self.enabled {
            tokenize_line(&self.table, line, text)
        } else {
            Vec::new()
        };
        trace!(line, spans = spans.len(), "retagged line");

        buf.retain_line_tags(line, &|tag| tag == Tag::Selection);
        buf.extend_line_tags(line, &spans);
        true
    }

    /// Re-tag every line in order. Returns the number of lines processed.
    pub fn retag_document<B: TextBuffer>(&self, buf: &mut B) -> usize {
        let count = buf.line_count();
        let retagged = (1..=count).filter(|&line| self.retag_line(buf, line)).count();
        debug!(lines = retagged, "retagged document");
        retagged
    }

    /// Toggle classification on/off
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }
}

impl Default for Retagger {
    fn default() -> Self {
        Self::new(RuleTable::python())
    }
}
