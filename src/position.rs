//! Document coordinates
//!
//! Lines are 1-based and columns are 0-based character offsets. The
//! `"line.column"` string form is only produced or parsed at the buffer
//! boundary; everything inside the editor passes `Position` values around.

use std::fmt;
use std::str::FromStr;

use crate::error::EditorError;

/// A coordinate in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Line number, starting at 1
    pub line: usize,
    /// Character column, starting at 0
    pub column: usize,
}

impl Position {
    /// Create a position
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Start of the document
    pub fn start() -> Self {
        Self { line: 1, column: 0 }
    }

    /// Start of a line
    pub fn line_start(line: usize) -> Self {
        Self { line, column: 0 }
    }

    /// Move forward by `n` characters on the same line
    pub fn offset(self, n: usize) -> Self {
        Self {
            line: self.line,
            column: self.column + n,
        }
    }

    /// Parse an external `"line.column"` address
    pub fn parse(addr: &str) -> Result<Self, EditorError> {
        let invalid = || EditorError::InvalidPosition(addr.to_string());
        let (line, column) = addr.split_once('.').ok_or_else(invalid)?;
        let line: usize = line.trim().parse().map_err(|_| invalid())?;
        let column: usize = column.trim().parse().map_err(|_| invalid())?;
        if line == 0 {
            return Err(invalid());
        }
        Ok(Self { line, column })
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.line, self.column)
    }
}

impl FromStr for Position {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A half-open character range within a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    /// Line number (1-based)
    pub line: usize,
    /// First column covered (inclusive)
    pub start: usize,
    /// Column after the last one covered (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a span; `end` is raised to `start` if given smaller
    pub fn new(line: usize, start: usize, end: usize) -> Self {
        Self {
            line,
            start,
            end: end.max(start),
        }
    }

    /// Position of the first character
    pub fn start_pos(&self) -> Position {
        Position::new(self.line, self.start)
    }

    /// Position just past the last character
    pub fn end_pos(&self) -> Position {
        Position::new(self.line, self.end)
    }
}
