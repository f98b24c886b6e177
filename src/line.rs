//! Line representation and column arithmetic
//!
//! A line stores its text without the trailing newline. Editing and tagging
//! address a line by character column; the byte offsets needed to touch the
//! underlying `String` are derived here and nowhere else.

use unicode_width::UnicodeWidthChar;

/// Terminal cells taken by `ch` when it starts at display column `at`
pub fn cell_width(ch: char, at: usize, tab_width: usize) -> usize {
    if ch == '\t' {
        let tab_width = tab_width.max(1);
        tab_width - at % tab_width
    } else {
        ch.width().unwrap_or(1)
    }
}

/// A single line of text in a buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    text: String,
}

impl Line {
    /// Create a new empty line
    pub fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Get the text content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Byte offset of a character column, clamped to the end of the line
    pub fn col_to_byte(&self, col: usize) -> usize {
        self.text
            .char_indices()
            .nth(col)
            .map(|(byte, _)| byte)
            .unwrap_or(self.text.len())
    }

    /// Display column (terminal cells) of a character column
    pub fn col_to_display(&self, col: usize, tab_width: usize) -> usize {
        self.text
            .chars()
            .take(col)
            .fold(0, |at, ch| at + cell_width(ch, at, tab_width))
    }

    /// Character column covering a display column, clamped to the line end
    pub fn display_to_col(&self, display: usize, tab_width: usize) -> usize {
        let mut at = 0;
        for (col, ch) in self.text.chars().enumerate() {
            let width = cell_width(ch, at, tab_width);
            if display < at + width {
                return col;
            }
            at += width;
        }
        self.char_len()
    }

    /// Text between two character columns
    pub fn slice(&self, start: usize, end: usize) -> &str {
        let start = self.col_to_byte(start);
        let end = self.col_to_byte(end).max(start);
        &self.text[start..end]
    }

    /// Insert a string at a character column
    pub fn insert_str(&mut self, col: usize, s: &str) {
        let byte = self.col_to_byte(col);
        self.text.insert_str(byte, s);
    }

    /// Delete a range of character columns and return the deleted text
    pub fn delete_range(&mut self, start: usize, end: usize) -> String {
        let start = self.col_to_byte(start);
        let end = self.col_to_byte(end).max(start);
        self.text.drain(start..end).collect()
    }

    /// Split at a character column, returning the remainder
    pub fn split_off(&mut self, col: usize) -> Line {
        let byte = self.col_to_byte(col);
        Line::from(self.text.split_off(byte))
    }

    /// Append another line's content to this line
    pub fn append(&mut self, other: Line) {
        self.text.push_str(&other.text);
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Self {
            text: s.to_string(),
        }
    }
}

impl From<String> for Line {
    fn from(text: String) -> Self {
        Self { text }
    }
}
