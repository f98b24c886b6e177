//! Buffer representation - lines of text plus a tag overlay
//!
//! `TextBuffer` is the contract the highlighting and search code works
//! against. `Buffer` implements it over a `Vec<Line>` and keeps a per-line
//! list of tagged character ranges that moves along with edits.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{EditorError, Result};
use crate::line::Line;
use crate::position::{Position, Span};
use crate::syntax::Tag;

/// Named positions in a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    /// The insertion cursor
    Insert,
    /// Just past the last character of the document
    End,
}

/// Text storage with tagging and search
pub trait TextBuffer {
    /// Number of lines (at least 1)
    fn line_count(&self) -> usize;

    /// Text of a 1-based line
    fn line_text(&self, line: usize) -> Option<&str>;

    /// Text between two positions, lines joined with `\n`
    fn get_range(&self, start: Position, end: Position) -> String;

    /// Insert text, returning the position just after it
    fn insert(&mut self, pos: Position, text: &str) -> Position;

    /// Delete between two positions, returning the removed text
    fn delete(&mut self, start: Position, end: Position) -> String;

    /// Resolve a mark
    fn index_of(&self, mark: Mark) -> Position;

    /// Tag the characters between two positions
    fn tag_add(&mut self, tag: Tag, start: Position, end: Position);

    /// Untag the characters between two positions
    fn tag_remove(&mut self, tag: Tag, start: Position, end: Position);

    /// Drop every tag on a line that `keep` rejects
    fn retain_line_tags(&mut self, line: usize, keep: &dyn Fn(Tag) -> bool);

    /// Tag many spans of one line in a single pass. Columns are clamped to
    /// the line; each span's own line number is ignored.
    fn extend_line_tags(&mut self, line: usize, spans: &[(Span, Tag)]);

    /// Tags currently applied anywhere in the buffer
    fn tag_names(&self) -> BTreeSet<Tag>;

    /// Tagged spans on a line, ordered by start column then tag
    fn tags_on_line(&self, line: usize) -> Vec<(Span, Tag)>;

    /// First occurrence of `needle` at or after `from`. Matches never
    /// cross a line break.
    fn search(&self, needle: &str, from: Position, ignore_case: bool) -> Option<Position>;

    /// Start columns of the non-overlapping occurrences of `needle` on one
    /// line, scanned left to right in one pass
    fn line_matches(&self, line: usize, needle: &str, ignore_case: bool) -> Vec<usize>;
}

/// A tagged character range within one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TagRange {
    start: usize,
    end: usize,
    tag: Tag,
}

/// Tags on a single line
#[derive(Debug, Clone, Default)]
struct LineTags {
    ranges: Vec<TagRange>,
}

impl LineTags {
    fn add(&mut self, tag: Tag, start: usize, end: usize) {
        if start >= end {
            return;
        }
        let mut start = start;
        let mut end = end;
        // merge with touching or overlapping ranges of the same tag
        self.ranges.retain(|r| {
            if r.tag == tag && r.start <= end && start <= r.end {
                start = start.min(r.start);
                end = end.max(r.end);
                false
            } else {
                true
            }
        });
        let at = self.ranges.partition_point(|r| (r.start, r.tag) < (start, tag));
        self.ranges.insert(at, TagRange { start, end, tag });
    }

    /// Add many ranges with one sort, merging same-tag neighbours
    fn extend(&mut self, new: impl IntoIterator<Item = TagRange>) {
        self.ranges.extend(new.into_iter().filter(|r| r.start < r.end));
        self.ranges.sort_by_key(|r| (r.tag, r.start));

        let mut merged: Vec<TagRange> = Vec::with_capacity(self.ranges.len());
        for r in self.ranges.drain(..) {
            match merged.last_mut() {
                Some(last) if last.tag == r.tag && r.start <= last.end => {
                    last.end = last.end.max(r.end);
                }
                _ => merged.push(r),
            }
        }
        merged.sort_by_key(|r| (r.start, r.tag));
        self.ranges = merged;
    }

    fn remove(&mut self, tag: Tag, start: usize, end: usize) {
        if start >= end {
            return;
        }
        let mut kept = Vec::with_capacity(self.ranges.len());
        for r in self.ranges.drain(..) {
            if r.tag != tag || r.end <= start || r.start >= end {
                kept.push(r);
                continue;
            }
            if r.start < start {
                kept.push(TagRange { end: start, ..r });
            }
            if r.end > end {
                kept.push(TagRange { start: end, ..r });
            }
        }
        kept.sort_by_key(|r| (r.start, r.tag));
        self.ranges = kept;
    }

    /// Text of `len` characters was inserted at `col`
    fn shift_insert(&mut self, col: usize, len: usize) {
        for r in &mut self.ranges {
            if r.start >= col {
                r.start += len;
                r.end += len;
            } else if r.end > col {
                r.end += len;
            }
        }
    }

    /// Characters `start..end` were removed
    fn shift_delete(&mut self, start: usize, end: usize) {
        let len = end - start;
        let squash = |c: usize| {
            if c <= start {
                c
            } else if c >= end {
                c - len
            } else {
                start
            }
        };
        for r in &mut self.ranges {
            r.start = squash(r.start);
            r.end = squash(r.end);
        }
        self.ranges.retain(|r| r.start < r.end);
    }

    /// Split at `col`, returning tags for the part after it (rebased to 0)
    fn split_off(&mut self, col: usize) -> LineTags {
        let mut tail = LineTags::default();
        let mut head = Vec::with_capacity(self.ranges.len());
        for r in self.ranges.drain(..) {
            if r.start < col {
                head.push(TagRange { end: r.end.min(col), ..r });
            }
            if r.end > col {
                tail.ranges.push(TagRange {
                    start: r.start.max(col) - col,
                    end: r.end - col,
                    tag: r.tag,
                });
            }
        }
        self.ranges = head;
        tail
    }

    /// Append tags of a line joined at column `at`
    fn append(&mut self, other: LineTags, at: usize) {
        self.extend(other.ranges.into_iter().map(|r| TagRange {
            start: r.start + at,
            end: r.end + at,
            tag: r.tag,
        }));
    }
}

/// A buffer containing text, tags and file metadata
#[derive(Debug)]
pub struct Buffer {
    /// Lines of text (never empty)
    lines: Vec<Line>,
    /// Tags per line, index-aligned with `lines`
    tags: Vec<LineTags>,
    /// Insertion cursor
    insert: Position,
    /// Associated file path (None for unnamed buffers)
    filename: Option<PathBuf>,
    /// Whether buffer has unsaved changes
    modified: bool,
}

impl Buffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self {
            lines: vec![Line::new()],
            tags: vec![LineTags::default()],
            insert: Position::start(),
            filename: None,
            modified: false,
        }
    }

    /// Create a buffer from a string
    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.set_text(text);
        buffer
    }

    /// Create a buffer from file contents
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => EditorError::FileNotFound(path.display().to_string()),
            _ => EditorError::Io(e),
        })?;
        let mut buffer = Self::from_text(&content);
        buffer.filename = Some(path.to_path_buf());
        debug!(path = %path.display(), lines = buffer.line_count(), "loaded file");
        Ok(buffer)
    }

    /// Replace the whole document, dropping all tags
    pub fn set_text(&mut self, text: &str) {
        let mut lines: Vec<Line> = text.lines().map(Line::from).collect();
        if lines.is_empty() {
            lines.push(Line::new());
        }
        self.tags = vec![LineTags::default(); lines.len()];
        self.lines = lines;
        self.insert = Position::start();
        self.modified = false;
    }

    /// Whole document text
    pub fn text(&self) -> String {
        let lines: Vec<&str> = self.lines.iter().map(Line::text).collect();
        lines.join("\n")
    }

    /// Get filename if set
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Set the filename
    pub fn set_filename(&mut self, path: Option<PathBuf>) {
        self.filename = path;
    }

    /// Display name for the status line
    pub fn name(&self) -> String {
        self.filename
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string())
    }

    /// Check if buffer is modified
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Mark buffer as modified
    pub fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }

    /// Get a line by 1-based number
    pub fn line(&self, line: usize) -> Option<&Line> {
        line.checked_sub(1).and_then(|idx| self.lines.get(idx))
    }

    /// Length of a line in characters
    pub fn line_len(&self, line: usize) -> Option<usize> {
        self.line(line).map(Line::char_len)
    }

    /// Move the insertion cursor (clamped into the document)
    pub fn set_insert(&mut self, pos: Position) {
        self.insert = self.clamp(pos);
    }

    /// Clamp a position into the document
    pub fn clamp(&self, pos: Position) -> Position {
        let line = pos.line.clamp(1, self.lines.len());
        let len = self.lines[line - 1].char_len();
        Position::new(line, pos.column.min(len))
    }

    /// Write buffer to its file
    pub fn save(&mut self) -> Result<()> {
        let path = self.filename.clone().ok_or(EditorError::NoFileName)?;
        self.write_to(&path)?;
        self.modified = false;
        Ok(())
    }

    /// Write buffer to a specific path
    pub fn write_to(&self, path: &Path) -> Result<()> {
        use std::io::Write;
        let mut file = std::fs::File::create(path)?;
        for (i, line) in self.lines.iter().enumerate() {
            write!(file, "{}", line.text())?;
            if i < self.lines.len() - 1 {
                writeln!(file)?;
            }
        }
        debug!(path = %path.display(), lines = self.lines.len(), "wrote file");
        Ok(())
    }

    /// Apply `f` to each line touched by `start..end` with its column range
    fn for_each_line_range(&mut self, start: Position, end: Position, mut f: impl FnMut(&mut LineTags, usize, usize)) {
        if start.line == 0 || start.line > self.lines.len() || end < start {
            return;
        }
        let last = end.line.min(self.lines.len());
        for line in start.line..=last {
            let len = self.lines[line - 1].char_len();
            let from = if line == start.line { start.column.min(len) } else { 0 };
            let to = if line == end.line { end.column.min(len) } else { len };
            f(&mut self.tags[line - 1], from, to);
        }
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-character comparison, optionally ignoring case
fn chars_match(a: char, b: char, ignore_case: bool) -> bool {
    a == b || (ignore_case && a.to_lowercase().eq(b.to_lowercase()))
}

/// First column at or after `from` where `needle` occurs in `hay`
fn find_from(hay: &[char], needle: &[char], from: usize, ignore_case: bool) -> Option<usize> {
    if needle.is_empty() || needle.len() > hay.len() {
        return None;
    }
    (from..=hay.len() - needle.len()).find(|&i| {
        hay[i..i + needle.len()]
            .iter()
            .zip(needle)
            .all(|(&a, &b)| chars_match(a, b, ignore_case))
    })
}

impl TextBuffer for Buffer {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_text(&self, line: usize) -> Option<&str> {
        self.line(line).map(Line::text)
    }

    fn get_range(&self, start: Position, end: Position) -> String {
        let start = self.clamp(start);
        let end = self.clamp(end);
        if end <= start {
            return String::new();
        }
        if start.line == end.line {
            return self.lines[start.line - 1].slice(start.column, end.column).to_string();
        }
        let mut out = String::new();
        for line in start.line..=end.line {
            let l = &self.lines[line - 1];
            let from = if line == start.line { start.column } else { 0 };
            let to = if line == end.line { end.column } else { l.char_len() };
            out.push_str(l.slice(from, to));
            if line != end.line {
                out.push('\n');
            }
        }
        out
    }

    fn insert(&mut self, pos: Position, text: &str) -> Position {
        let pos = self.clamp(pos);
        let mut cursor = pos;
        let mut pieces = text.split('\n').peekable();

        while let Some(piece) = pieces.next() {
            let piece = piece.strip_suffix('\r').unwrap_or(piece);
            let idx = cursor.line - 1;
            let len = piece.chars().count();
            if len > 0 {
                self.lines[idx].insert_str(cursor.column, piece);
                self.tags[idx].shift_insert(cursor.column, len);
                cursor.column += len;
            }
            if pieces.peek().is_some() {
                let rest = self.lines[idx].split_off(cursor.column);
                let rest_tags = self.tags[idx].split_off(cursor.column);
                self.lines.insert(idx + 1, rest);
                self.tags.insert(idx + 1, rest_tags);
                cursor = Position::line_start(cursor.line + 1);
            }
        }

        if !text.is_empty() {
            self.modified = true;
        }
        cursor
    }

    fn delete(&mut self, start: Position, end: Position) -> String {
        let start = self.clamp(start);
        let end = self.clamp(end);
        if end <= start {
            return String::new();
        }
        let removed = self.get_range(start, end);
        let idx = start.line - 1;

        if start.line == end.line {
            self.lines[idx].delete_range(start.column, end.column);
            self.tags[idx].shift_delete(start.column, end.column);
        } else {
            let mut last = self.lines[end.line - 1].clone();
            let mut last_tags = self.tags[end.line - 1].clone();
            let tail = last.split_off(end.column);
            let tail_tags = last_tags.split_off(end.column);

            let len = self.lines[idx].char_len();
            self.lines[idx].delete_range(start.column, len);
            self.tags[idx].shift_delete(start.column, len);
            self.lines[idx].append(tail);
            self.tags[idx].append(tail_tags, start.column);

            self.lines.drain(start.line..end.line);
            self.tags.drain(start.line..end.line);
        }

        self.insert = self.clamp(self.insert);
        self.modified = true;
        removed
    }

    fn index_of(&self, mark: Mark) -> Position {
        match mark {
            Mark::Insert => self.insert,
            Mark::End => {
                let line = self.lines.len();
                Position::new(line, self.lines[line - 1].char_len())
            }
        }
    }

    fn tag_add(&mut self, tag: Tag, start: Position, end: Position) {
        self.for_each_line_range(start, end, |tags, from, to| tags.add(tag, from, to));
    }

    fn tag_remove(&mut self, tag: Tag, start: Position, end: Position) {
        self.for_each_line_range(start, end, |tags, from, to| tags.remove(tag, from, to));
    }

    fn retain_line_tags(&mut self, line: usize, keep: &dyn Fn(Tag) -> bool) {
        if let Some(tags) = line.checked_sub(1).and_then(|idx| self.tags.get_mut(idx)) {
            tags.ranges.retain(|r| keep(r.tag));
        }
    }

    fn extend_line_tags(&mut self, line: usize, spans: &[(Span, Tag)]) {
        let Some(len) = self.line_len(line) else {
            return;
        };
        self.tags[line - 1].extend(spans.iter().map(|&(span, tag)| TagRange {
            start: span.start.min(len),
            end: span.end.min(len),
            tag,
        }));
    }

    fn tag_names(&self) -> BTreeSet<Tag> {
        self.tags
            .iter()
            .flat_map(|line| line.ranges.iter().map(|r| r.tag))
            .collect()
    }

    fn tags_on_line(&self, line: usize) -> Vec<(Span, Tag)> {
        line.checked_sub(1)
            .and_then(|idx| self.tags.get(idx))
            .map(|tags| {
                tags.ranges
                    .iter()
                    .map(|r| (Span::new(line, r.start, r.end), r.tag))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn search(&self, needle: &str, from: Position, ignore_case: bool) -> Option<Position> {
        if needle.is_empty() || needle.contains('\n') || from.line == 0 {
            return None;
        }
        let needle: Vec<char> = needle.chars().collect();

        for line in from.line..=self.lines.len() {
            let hay: Vec<char> = self.lines[line - 1].text().chars().collect();
            let first = if line == from.line { from.column } else { 0 };
            if let Some(column) = find_from(&hay, &needle, first, ignore_case) {
                return Some(Position::new(line, column));
            }
        }
        None
    }

    fn line_matches(&self, line: usize, needle: &str, ignore_case: bool) -> Vec<usize> {
        let Some(text) = self.line_text(line) else {
            return Vec::new();
        };
        if needle.contains('\n') {
            return Vec::new();
        }
        let needle: Vec<char> = needle.chars().collect();
        let hay: Vec<char> = text.chars().collect();

        let mut columns = Vec::new();
        let mut from = 0;
        while let Some(column) = find_from(&hay, &needle, from, ignore_case) {
            columns.push(column);
            from = column + needle.len();
        }
        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(buf: &Buffer, line: usize) -> Vec<(usize, usize, Tag)> {
        buf.tags_on_line(line)
            .into_iter()
            .map(|(s, t)| (s.start, s.end, t))
            .collect()
    }

    #[test]
    fn test_from_text_and_text() {
        let buf = Buffer::from_text("one\ntwo\n\nfour");
        assert_eq!(buf.line_count(), 4);
        assert_eq!(buf.line_text(2), Some("two"));
        assert_eq!(buf.line_text(3), Some(""));
        assert_eq!(buf.line_text(5), None);
        assert_eq!(buf.line_text(0), None);
        assert_eq!(buf.text(), "one\ntwo\n\nfour");

        let empty = Buffer::from_text("");
        assert_eq!(empty.line_count(), 1);
        assert_eq!(empty.index_of(Mark::End), Position::new(1, 0));
    }

    #[test]
    fn test_insert_multiline() {
        let mut buf = Buffer::from_text("hello world");
        let end = buf.insert(Position::new(1, 5), ",\nbig");
        assert_eq!(end, Position::new(2, 3));
        assert_eq!(buf.text(), "hello,\nbig world");
        assert!(buf.is_modified());
    }

    #[test]
    fn test_delete_across_lines() {
        let mut buf = Buffer::from_text("abc\ndef\nghi");
        let removed = buf.delete(Position::new(1, 1), Position::new(3, 1));
        assert_eq!(removed, "bc\ndef\ng");
        assert_eq!(buf.text(), "ahi");
        assert_eq!(buf.line_count(), 1);
    }

    #[test]
    fn test_get_range() {
        let buf = Buffer::from_text("abc\ndef");
        assert_eq!(buf.get_range(Position::new(1, 1), Position::new(2, 2)), "bc\nde");
        assert_eq!(buf.get_range(Position::new(2, 2), Position::new(1, 1)), "");
    }

    #[test]
    fn test_tag_add_merges_and_remove_splits() {
        let mut buf = Buffer::from_text("0123456789");
        buf.tag_add(Tag::Digit, Position::new(1, 0), Position::new(1, 4));
        buf.tag_add(Tag::Digit, Position::new(1, 3), Position::new(1, 6));
        assert_eq!(spans(&buf, 1), vec![(0, 6, Tag::Digit)]);

        buf.tag_remove(Tag::Digit, Position::new(1, 2), Position::new(1, 3));
        assert_eq!(spans(&buf, 1), vec![(0, 2, Tag::Digit), (3, 6, Tag::Digit)]);

        buf.tag_remove(Tag::String, Position::new(1, 0), Position::new(1, 10));
        assert_eq!(spans(&buf, 1).len(), 2);
        assert_eq!(buf.tag_names().into_iter().collect::<Vec<_>>(), vec![Tag::Digit]);
    }

    #[test]
    fn test_tag_add_keeps_column_order() {
        let mut buf = Buffer::from_text("0123456789");
        buf.tag_add(Tag::String, Position::new(1, 6), Position::new(1, 8));
        buf.tag_add(Tag::Digit, Position::new(1, 0), Position::new(1, 2));
        buf.tag_add(Tag::Match, Position::new(1, 0), Position::new(1, 1));
        buf.tag_add(Tag::Digit, Position::new(1, 2), Position::new(1, 3));
        assert_eq!(
            spans(&buf, 1),
            vec![(0, 3, Tag::Digit), (0, 1, Tag::Match), (6, 8, Tag::String)]
        );
    }

    #[test]
    fn test_line_tags_in_bulk() {
        let mut buf = Buffer::from_text("abcdef
xyz");
        buf.tag_add(Tag::Selection, Position::start(), buf.index_of(Mark::End));
        buf.tag_add(Tag::Digit, Position::new(1, 0), Position::new(1, 1));

        buf.retain_line_tags(1, &|tag| tag == Tag::Selection);
        assert_eq!(spans(&buf, 1), vec![(0, 6, Tag::Selection)]);

        buf.extend_line_tags(
            1,
            &[
                (Span::new(1, 4, 9), Tag::String),
                (Span::new(1, 0, 2), Tag::Digit),
                (Span::new(1, 2, 3), Tag::Digit),
            ],
        );
        assert_eq!(
            spans(&buf, 1),
            vec![(0, 3, Tag::Digit), (0, 6, Tag::Selection), (4, 6, Tag::String)]
        );
        // other lines are untouched
        assert_eq!(spans(&buf, 2), vec![(0, 3, Tag::Selection)]);

        buf.extend_line_tags(7, &[(Span::new(7, 0, 1), Tag::Digit)]);
        buf.retain_line_tags(0, &|_| false);
        assert_eq!(buf.line_count(), 2);
    }

    #[test]
    fn test_line_matches() {
        let buf = Buffer::from_text("aaa Cat cat
none");
        assert_eq!(buf.line_matches(1, "aa", false), vec![0]);
        assert_eq!(buf.line_matches(1, "cat", false), vec![8]);
        assert_eq!(buf.line_matches(1, "cat", true), vec![4, 8]);
        assert!(buf.line_matches(2, "cat", false).is_empty());
        assert!(buf.line_matches(3, "cat", false).is_empty());
        assert!(buf.line_matches(1, "", false).is_empty());
        assert!(buf.line_matches(1, "a\na", false).is_empty());
    }

    #[test]
    fn test_tag_add_across_lines() {
        let mut buf = Buffer::from_text("ab\ncd\nef");
        buf.tag_add(Tag::Selection, Position::start(), buf.index_of(Mark::End));
        for line in 1..=3 {
            assert_eq!(spans(&buf, line), vec![(0, 2, Tag::Selection)]);
        }
    }

    #[test]
    fn test_tags_follow_edits() {
        let mut buf = Buffer::from_text("x = 42");
        buf.tag_add(Tag::Digit, Position::new(1, 4), Position::new(1, 6));

        buf.insert(Position::new(1, 0), "yy");
        assert_eq!(spans(&buf, 1), vec![(6, 8, Tag::Digit)]);

        buf.insert(Position::new(1, 3), "\n");
        assert_eq!(spans(&buf, 1), vec![]);
        assert_eq!(spans(&buf, 2), vec![(3, 5, Tag::Digit)]);

        buf.delete(Position::new(1, 3), Position::new(2, 0));
        assert_eq!(spans(&buf, 1), vec![(6, 8, Tag::Digit)]);
        assert_eq!(buf.text(), "yyx = 42");
    }

    #[test]
    fn test_tag_out_of_range_is_ignored() {
        let mut buf = Buffer::from_text("abc");
        buf.tag_add(Tag::Digit, Position::new(5, 0), Position::new(5, 2));
        buf.tag_remove(Tag::Digit, Position::new(0, 0), Position::new(0, 2));
        assert!(buf.tag_names().is_empty());
        assert!(buf.tags_on_line(9).is_empty());
    }

    #[test]
    fn test_search() {
        let buf = Buffer::from_text("cat cat\ndog CAT");
        assert_eq!(buf.search("cat", Position::start(), false), Some(Position::new(1, 0)));
        assert_eq!(buf.search("cat", Position::new(1, 1), false), Some(Position::new(1, 4)));
        assert_eq!(buf.search("cat", Position::new(1, 5), false), None);
        assert_eq!(buf.search("cat", Position::new(1, 5), true), Some(Position::new(2, 4)));
        assert_eq!(buf.search("", Position::start(), false), None);
        assert_eq!(buf.search("t\nd", Position::start(), false), None);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.py");

        let mut buf = Buffer::from_text("import os\nprint(1)");
        buf.set_filename(Some(path.clone()));
        buf.save().unwrap();
        assert!(!buf.is_modified());

        let loaded = Buffer::from_file(&path).unwrap();
        assert_eq!(loaded.text(), "import os\nprint(1)");
        assert_eq!(loaded.name(), "demo.py");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Buffer::from_file(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, EditorError::FileNotFound(_)));
    }

    #[test]
    fn test_save_without_filename() {
        let mut buf = Buffer::from_text("x");
        assert!(matches!(buf.save(), Err(EditorError::NoFileName)));
    }
}
