//! Cursor location for the status line

use std::fmt;

use crate::buffer::{Mark, TextBuffer};
use crate::position::Position;

/// 1-based line and column, as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorInfo {
    pub line: usize,
    pub column: usize,
}

impl CursorInfo {
    /// Status text, e.g. `Line: 3 | Column: 7`
    pub fn status(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CursorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line: {} | Column: {}", self.line, self.column)
    }
}

/// Convert an insertion position to its displayed form
pub fn locate(pos: Position) -> CursorInfo {
    CursorInfo {
        line: pos.line,
        column: pos.column + 1,
    }
}

/// Locate the insertion cursor of a buffer
pub fn locate_insert<B: TextBuffer>(buf: &B) -> CursorInfo {
    locate(buf.index_of(Mark::Insert))
}
