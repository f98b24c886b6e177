//! Editor session and main loop
//!
//! `Session` owns the document and all view state and reacts to input
//! events without touching the terminal. `Editor` pairs a session with the
//! terminal and runs the event loop.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::buffer::{Buffer, Mark, TextBuffer};
use crate::command::{CommandId, CommandStatus, KeyTable};
use crate::config::{Config, THEMES};
use crate::cursor::{self, CursorInfo};
use crate::display::{self, Display};
use crate::error::{EditorError, Result};
use crate::input::{self, special, InputEvent, Key};
use crate::mirror::{LineNumberMirror, ScrollEvent, ScrollSync};
use crate::position::Position;
use crate::search;
use crate::syntax::{Retagger, Tag};
use crate::terminal::Terminal;

/// What to perform when a prompt completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAction {
    FindAll,
    OpenFile,
    SaveAs,
    GotoPosition,
}

impl PromptAction {
    fn label(self) -> &'static str {
        match self {
            PromptAction::FindAll => "Find all",
            PromptAction::OpenFile => "Open file",
            PromptAction::SaveAs => "Save as",
            PromptAction::GotoPosition => "Go to line[.column]",
        }
    }
}

/// Minibuffer prompt state
#[derive(Debug, Clone)]
pub struct Prompt {
    /// What to do when complete
    pub action: PromptAction,
    /// Current input
    pub input: String,
}

/// Find-all settings, remembered between searches
#[derive(Debug, Clone, Default)]
pub struct FindState {
    /// Last needle searched for
    pub needle: String,
    /// Whether matching ignores case
    pub ignore_case: bool,
}

/// One editing session: a document plus everything drawn around it
pub struct Session {
    /// The document
    pub buffer: Buffer,
    /// Classification engine
    pub retagger: Retagger,
    /// Line-number gutter
    pub mirror: LineNumberMirror,
    /// Content and gutter scroll positions
    pub scroll: ScrollSync,
    /// Settings
    pub config: Config,
    /// Key bindings
    pub keytab: KeyTable,
    /// Find-all state
    pub find: FindState,
    /// Active prompt, if any
    pub prompt: Option<Prompt>,
    /// Last user-visible message
    pub message: Option<String>,
    /// Whether the cursor location is shown
    pub show_cursor_info: bool,
    /// Whether editor is running
    pub running: bool,
    /// Quit was requested once with unsaved changes
    quit_pending: bool,
    /// Whether the whole document carries the selection tag
    selection: bool,
    /// Column kept while moving vertically
    goal_column: Option<usize>,
}

impl Session {
    /// Create a session with an empty document and a view `height` rows tall
    pub fn new(config: Config, height: usize) -> Self {
        let mut keytab = KeyTable::with_defaults();
        let applied = keytab.apply_overrides(&config.key_bindings);
        if applied > 0 {
            debug!(applied, "key binding overrides");
        }

        let mut session = Self {
            buffer: Buffer::new(),
            retagger: Retagger::default(),
            mirror: LineNumberMirror::new(config.show_line_numbers),
            scroll: ScrollSync::new(height, 1),
            find: FindState {
                needle: String::new(),
                ignore_case: config.ignore_case,
            },
            show_cursor_info: config.show_cursor_info,
            config,
            keytab,
            prompt: None,
            message: None,
            running: true,
            quit_pending: false,
            selection: false,
            goal_column: None,
        };
        session.document_replaced();
        session
    }

    /// Set a message to display
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    /// Show an error to the user and log it
    pub fn report_error(&mut self, err: EditorError) {
        warn!(error = %err, "command failed");
        self.message = Some(err.to_string());
    }

    /// Cursor location for the status line, when enabled
    pub fn cursor_info(&self) -> Option<CursorInfo> {
        self.show_cursor_info
            .then(|| cursor::locate_insert(&self.buffer))
    }

    /// Text of the active prompt line
    pub fn prompt_line(&self) -> Option<String> {
        let prompt = self.prompt.as_ref()?;
        let flag = if prompt.action == PromptAction::FindAll && self.find.ignore_case {
            " [ignore case]"
        } else {
            ""
        };
        Some(format!("{}{}: {}", prompt.action.label(), flag, prompt.input))
    }

    fn cursor(&self) -> Position {
        self.buffer.index_of(Mark::Insert)
    }

    // Files

    /// Load a file, replacing the document
    pub fn open(&mut self, path: &Path) -> Result<()> {
        self.buffer = Buffer::from_file(path)?;
        self.document_replaced();
        info!(path = %path.display(), lines = self.buffer.line_count(), "opened file");
        self.set_message(format!("Opened {}", path.display()));
        Ok(())
    }

    /// Open a file, or start an empty document that will be saved to it
    pub fn open_or_create(&mut self, path: &Path) -> Result<()> {
        match self.open(path) {
            Err(EditorError::FileNotFound(_)) => {
                self.new_file();
                self.buffer.set_filename(Some(path.to_path_buf()));
                self.set_message(format!("New file: {}", path.display()));
                Ok(())
            }
            other => other,
        }
    }

    /// Start a fresh, unnamed document
    pub fn new_file(&mut self) {
        self.buffer = Buffer::new();
        self.document_replaced();
        self.set_message("New document");
    }

    /// Save to the current file name
    pub fn save(&mut self) -> Result<()> {
        self.buffer.save()?;
        info!(file = %self.buffer.name(), "saved");
        self.report_written();
        Ok(())
    }

    /// Save under a new name. The name is only adopted if the write succeeds.
    pub fn save_as(&mut self, path: PathBuf) -> Result<()> {
        self.buffer.write_to(&path)?;
        self.buffer.set_filename(Some(path));
        self.buffer.set_modified(false);
        info!(file = %self.buffer.name(), "saved as");
        self.report_written();
        Ok(())
    }

    fn report_written(&mut self) {
        let lines = self.buffer.line_count();
        let noun = if lines == 1 { "line" } else { "lines" };
        self.set_message(format!("Wrote {} {} to {}", lines, noun, self.buffer.name()));
    }

    /// Ask to quit. Returns true when the session stops.
    pub fn request_quit(&mut self) -> bool {
        if !self.buffer.is_modified() || self.quit_pending {
            self.running = false;
            return true;
        }
        self.quit_pending = true;
        let keys = self.keytab.keys_for(CommandId::Quit);
        let key = keys.first().map(String::as_str).unwrap_or("quit");
        self.set_message(format!("Buffer modified; press {} again to quit", key));
        false
    }

    // Events

    /// React to one input event
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Paste(text) => match self.prompt.as_mut() {
                Some(prompt) => prompt.input.push_str(text.lines().next().unwrap_or("")),
                None => self.paste(&text),
            },
            InputEvent::Scroll(event) => {
                self.apply_scroll(event);
            }
            InputEvent::Click { row, col } => self.click(row as usize, col as usize),
            InputEvent::Resize { rows, .. } => self.resize(display::text_rows(rows)),
        }
    }

    /// React to a key press
    pub fn handle_key(&mut self, key: Key) {
        if self.prompt.is_some() {
            self.handle_prompt_key(key);
            return;
        }

        self.message = None;
        if let Some(id) = self.keytab.lookup(key) {
            self.execute(id);
            return;
        }

        self.quit_pending = false;
        match key.self_insert() {
            Some(ch) => self.insert_char(ch),
            None => self.set_message(format!("{} is not bound", key.display_name())),
        }
    }

    /// Run a command, reporting any error in the message line
    pub fn execute(&mut self, id: CommandId) -> CommandStatus {
        if id != CommandId::Quit {
            self.quit_pending = false;
        }
        if !matches!(
            id,
            CommandId::MoveUp | CommandId::MoveDown | CommandId::PageUp | CommandId::PageDown
        ) {
            self.goal_column = None;
        }

        match (id.handler())(self) {
            Ok(status) => {
                debug!(command = id.name(), ?status, "executed");
                status
            }
            Err(err) => {
                self.report_error(err);
                CommandStatus::Failure
            }
        }
    }

    // Prompts

    /// Open the prompt for an action
    pub fn start_prompt(&mut self, action: PromptAction) {
        let input = match action {
            PromptAction::FindAll => self.find.needle.clone(),
            PromptAction::SaveAs => self
                .buffer
                .filename()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            PromptAction::OpenFile | PromptAction::GotoPosition => String::new(),
        };
        self.prompt = Some(Prompt { action, input });
    }

    fn handle_prompt_key(&mut self, key: Key) {
        if key == Key::special(special::ENTER) {
            self.finish_prompt();
        } else if key == Key::special(special::ESCAPE) || key == Key::ctrl('g') {
            self.cancel_prompt();
        } else if key == Key::special(special::BACKSPACE) {
            if let Some(prompt) = self.prompt.as_mut() {
                prompt.input.pop();
            }
        } else if key == Key::special(special::TAB) {
            if matches!(&self.prompt, Some(p) if p.action == PromptAction::FindAll) {
                self.find.ignore_case = !self.find.ignore_case;
            }
        } else if let Some(ch) = key.self_insert() {
            if let Some(prompt) = self.prompt.as_mut() {
                prompt.input.push(ch);
            }
        }
    }

    fn finish_prompt(&mut self) {
        let Some(prompt) = self.prompt.take() else {
            return;
        };
        let result = match prompt.action {
            PromptAction::FindAll => {
                self.find_all(&prompt.input);
                Ok(())
            }
            PromptAction::OpenFile => match prompt.input.trim() {
                "" => Ok(()),
                path => self.open(Path::new(path)),
            },
            PromptAction::SaveAs => match prompt.input.trim() {
                "" => Err(EditorError::Message("No file name given".into())),
                path => self.save_as(PathBuf::from(path)),
            },
            PromptAction::GotoPosition => self.goto(prompt.input.trim()),
        };
        if let Err(err) = result {
            self.report_error(err);
        }
    }

    fn cancel_prompt(&mut self) {
        if let Some(prompt) = self.prompt.take() {
            if prompt.action == PromptAction::FindAll {
                self.clear_matches();
            }
        }
        self.set_message("Cancelled");
    }

    // Search and selection

    /// Highlight every occurrence of `needle`. An empty needle only clears
    /// and reports zero matches.
    pub fn find_all(&mut self, needle: &str) {
        let report = search::find_all(&mut self.buffer, needle, self.find.ignore_case);
        self.find.needle = report.needle.clone();
        self.set_message(report.message());
    }

    /// Remove all find-all highlights
    pub fn clear_matches(&mut self) {
        search::clear_matches(&mut self.buffer);
    }

    /// Select the whole document
    pub fn select_all(&mut self) {
        let end = self.buffer.index_of(Mark::End);
        self.buffer.tag_add(Tag::Selection, Position::start(), end);
        self.selection = true;
    }

    fn clear_selection(&mut self) {
        if self.selection {
            let end = self.buffer.index_of(Mark::End);
            self.buffer.tag_remove(Tag::Selection, Position::start(), end);
            self.selection = false;
        }
    }

    // View

    /// Switch classification on or off
    pub fn toggle_highlighting(&mut self) {
        self.retagger.toggle();
        self.retagger.retag_document(&mut self.buffer);
        let state = if self.retagger.enabled { "on" } else { "off" };
        self.set_message(format!("Highlighting {}", state));
    }

    /// Switch to the next colour theme
    pub fn cycle_theme(&mut self) {
        let next = THEMES
            .iter()
            .position(|(name, _, _)| name.eq_ignore_ascii_case(&self.config.theme))
            .map(|i| (i + 1) % THEMES.len())
            .unwrap_or(0);
        let name = THEMES[next].0;
        self.config.theme = name.to_string();
        self.set_message(format!("Theme: {}", name));
    }

    /// Scroll both views. Wheel notches move `wheel-lines` lines each.
    pub fn apply_scroll(&mut self, event: ScrollEvent) -> f64 {
        let event = match event {
            ScrollEvent::Wheel { .. } => {
                ScrollEvent::Units(event.units().unwrap_or(0) * self.config.wheel_lines as isize)
            }
            other => other,
        };
        self.scroll.apply(event)
    }

    /// Change the number of text rows
    pub fn resize(&mut self, height: usize) {
        self.scroll.resize(height);
        self.follow_cursor();
    }

    /// Move the cursor to a clicked screen cell
    pub fn click(&mut self, row: usize, col: usize) {
        let view = self.scroll.content();
        if row >= view.height() {
            return;
        }
        let line = (view.top_line() + row + 1).min(self.buffer.line_count());
        let display = col.saturating_sub(self.mirror.width());
        let column = self
            .buffer
            .line(line)
            .map(|l| l.display_to_col(display, self.config.tab_width))
            .unwrap_or(0);
        self.goal_column = None;
        self.move_to(Position::new(line, column));
    }

    /// Rows moved by page up/down
    pub fn page_size(&self) -> usize {
        self.scroll.content().height().saturating_sub(1).max(1)
    }

    // Motion

    fn move_to(&mut self, pos: Position) {
        self.buffer.set_insert(pos);
        self.follow_cursor();
    }

    fn follow_cursor(&mut self) {
        let line = self.cursor().line;
        self.scroll.follow_cursor(line - 1);
    }

    /// Move the cursor to an external `line[.column]` address
    pub fn goto(&mut self, addr: &str) -> Result<()> {
        let pos: Position = if addr.contains('.') {
            addr.parse()?
        } else {
            format!("{}.0", addr).parse()?
        };
        debug!(%pos, "goto");
        self.move_to(pos);
        Ok(())
    }

    pub fn move_left(&mut self) -> bool {
        let pos = self.cursor();
        let target = if pos.column > 0 {
            Position::new(pos.line, pos.column - 1)
        } else if pos.line > 1 {
            let prev = pos.line - 1;
            Position::new(prev, self.buffer.line_len(prev).unwrap_or(0))
        } else {
            return false;
        };
        self.move_to(target);
        true
    }

    pub fn move_right(&mut self) -> bool {
        let pos = self.cursor();
        let len = self.buffer.line_len(pos.line).unwrap_or(0);
        let target = if pos.column < len {
            pos.offset(1)
        } else if pos.line < self.buffer.line_count() {
            Position::line_start(pos.line + 1)
        } else {
            return false;
        };
        self.move_to(target);
        true
    }

    /// Move up (negative) or down by lines, keeping the goal column
    pub fn move_vertical(&mut self, lines: isize) -> bool {
        let pos = self.cursor();
        let goal = *self.goal_column.get_or_insert(pos.column);
        let count = self.buffer.line_count() as isize;
        let target = (pos.line as isize + lines).clamp(1, count) as usize;
        if target == pos.line {
            return false;
        }
        self.move_to(Position::new(target, goal));
        true
    }

    pub fn move_to_line_start(&mut self) {
        let line = self.cursor().line;
        self.move_to(Position::line_start(line));
    }

    pub fn move_to_line_end(&mut self) {
        let line = self.cursor().line;
        let len = self.buffer.line_len(line).unwrap_or(0);
        self.move_to(Position::new(line, len));
    }

    pub fn move_to_document_start(&mut self) {
        self.move_to(Position::start());
    }

    pub fn move_to_document_end(&mut self) {
        let end = self.buffer.index_of(Mark::End);
        self.move_to(end);
    }

    // Editing

    /// Type a character at the cursor
    pub fn insert_char(&mut self, ch: char) {
        let mut utf8 = [0u8; 4];
        self.insert_inline(ch.encode_utf8(&mut utf8));
    }

    /// Insert spaces up to the next tab stop
    pub fn insert_tab(&mut self) {
        let width = self.config.tab_width.max(1);
        let column = self.cursor().column;
        self.insert_inline(&" ".repeat(width - column % width));
    }

    /// Split the line at the cursor
    pub fn insert_newline(&mut self) {
        self.before_edit();
        let pos = self.cursor();
        let end = self.buffer.insert(pos, "\n");
        self.buffer.set_insert(end);
        self.retagger.retag_line(&mut self.buffer, pos.line);
        self.retagger.retag_line(&mut self.buffer, end.line);
        self.after_edit();
    }

    /// Delete the character before the cursor, joining lines at column 0
    pub fn delete_backward(&mut self) -> bool {
        let pos = self.cursor();
        let start = if pos.column > 0 {
            Position::new(pos.line, pos.column - 1)
        } else if pos.line > 1 {
            let prev = pos.line - 1;
            Position::new(prev, self.buffer.line_len(prev).unwrap_or(0))
        } else {
            return false;
        };
        self.delete_range(start, pos);
        true
    }

    /// Delete the character under the cursor, joining lines at line end
    pub fn delete_forward(&mut self) -> bool {
        let pos = self.cursor();
        let len = self.buffer.line_len(pos.line).unwrap_or(0);
        let end = if pos.column < len {
            pos.offset(1)
        } else if pos.line < self.buffer.line_count() {
            Position::line_start(pos.line + 1)
        } else {
            return false;
        };
        self.delete_range(pos, end);
        true
    }

    /// Insert arbitrary text and re-tag the whole document
    pub fn paste(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.before_edit();
        let end = self.buffer.insert(self.cursor(), text);
        self.buffer.set_insert(end);
        self.retagger.retag_document(&mut self.buffer);
        self.after_edit();
    }

    /// Insert text containing no line break, re-tagging its line
    fn insert_inline(&mut self, text: &str) {
        self.before_edit();
        let end = self.buffer.insert(self.cursor(), text);
        self.buffer.set_insert(end);
        self.retagger.retag_line(&mut self.buffer, end.line);
        self.after_edit();
    }

    fn delete_range(&mut self, start: Position, end: Position) {
        self.before_edit();
        self.buffer.delete(start, end);
        self.buffer.set_insert(start);
        self.retagger.retag_line(&mut self.buffer, start.line);
        self.after_edit();
    }

    fn before_edit(&mut self) {
        self.clear_selection();
        self.goal_column = None;
    }

    fn after_edit(&mut self) {
        let count = self.buffer.line_count();
        self.mirror.regenerate(count);
        self.scroll.set_total(count);
        self.follow_cursor();
    }

    /// A new document was loaded
    fn document_replaced(&mut self) {
        self.selection = false;
        self.goal_column = None;
        self.retagger.retag_document(&mut self.buffer);
        self.after_edit();
    }
}

/// A session attached to the terminal
pub struct Editor {
    terminal: Terminal,
    display: Display,
    /// The editing session
    pub session: Session,
}

impl Editor {
    /// Create editor state sized to the terminal
    pub fn new(terminal: Terminal, config: Config) -> Self {
        let height = display::text_rows(terminal.rows());
        Self {
            session: Session::new(config, height),
            display: Display::new(),
            terminal,
        }
    }

    /// Main editor loop
    pub fn run(&mut self) -> Result<()> {
        self.display.force_redraw();

        while self.session.running {
            self.display.render(&mut self.terminal, &self.session)?;

            let event = self.terminal.read_event()?;
            if let Some(event) = input::translate_event(event) {
                if let InputEvent::Resize { cols, rows } = event {
                    self.terminal.set_size(cols, rows);
                    self.display.force_redraw();
                }
                self.session.handle_event(event);
            }
        }

        info!("exiting");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Span;

    fn session() -> Session {
        Session::new(Config::default(), 10)
    }

    fn type_text(s: &mut Session, text: &str) {
        for ch in text.chars() {
            match ch {
                '\n' => s.handle_key(Key::special(special::ENTER)),
                ch => s.handle_key(Key::char(ch)),
            }
        }
    }

    fn spans(s: &Session, line: usize) -> Vec<(usize, usize, Tag)> {
        s.buffer
            .tags_on_line(line)
            .into_iter()
            .map(|(span, tag): (Span, Tag)| (span.start, span.end, tag))
            .collect()
    }

    #[test]
    fn test_typing_retags_line() {
        let mut s = session();
        type_text(&mut s, "x = 5");
        assert_eq!(spans(&s, 1), vec![(4, 5, Tag::Digit)]);

        type_text(&mut s, " None");
        assert_eq!(spans(&s, 1), vec![(4, 5, Tag::Digit), (6, 10, Tag::KeywordCaps)]);
        assert!(s.buffer.is_modified());
    }

    #[test]
    fn test_newline_retags_both_lines() {
        let mut s = session();
        s.paste("x = 5 None");
        s.buffer.set_insert(Position::new(1, 5));
        s.handle_key(Key::special(special::ENTER));

        assert_eq!(s.buffer.line_count(), 2);
        assert_eq!(spans(&s, 1), vec![(4, 5, Tag::Digit)]);
        assert_eq!(spans(&s, 2), vec![(1, 5, Tag::KeywordCaps)]);
        assert_eq!(s.mirror.text().lines().count(), 2);
    }

    #[test]
    fn test_paste_retags_document() {
        let mut s = session();
        s.handle_event(InputEvent::Paste("import os\nif True:\n    print(2)".into()));

        assert_eq!(s.buffer.line_count(), 3);
        assert_eq!(spans(&s, 1), vec![(0, 6, Tag::Keyword1)]);
        let line2 = spans(&s, 2);
        assert!(line2.contains(&(0, 2, Tag::KeywordFlow)));
        assert!(line2.contains(&(3, 7, Tag::KeywordCaps)));
        assert_eq!(spans(&s, 3), vec![(4, 9, Tag::KeywordFunc), (10, 11, Tag::Digit)]);
        assert_eq!(s.mirror.text(), "1\n2\n3\n");
    }

    #[test]
    fn test_backspace_joins_and_retags() {
        let mut s = session();
        s.paste("x = 1\n2");
        s.execute(CommandId::LineStart);
        s.handle_key(Key::special(special::BACKSPACE));

        assert_eq!(s.buffer.text(), "x = 12");
        assert_eq!(spans(&s, 1), vec![(4, 6, Tag::Digit)]);
        assert_eq!(s.mirror.text().lines().count(), 1);
        assert_eq!(s.cursor_info().map(|c| c.status()).as_deref(), Some("Line: 1 | Column: 6"));
    }

    #[test]
    fn test_delete_forward() {
        let mut s = session();
        s.paste("ab\ncd");
        s.execute(CommandId::DocumentStart);
        s.execute(CommandId::LineEnd);
        assert_eq!(s.execute(CommandId::DeleteForward), CommandStatus::Success);
        assert_eq!(s.buffer.text(), "abcd");
        s.execute(CommandId::DocumentEnd);
        assert_eq!(s.execute(CommandId::DeleteForward), CommandStatus::Failure);
    }

    #[test]
    fn test_find_all_prompt() {
        let mut s = session();
        s.paste("cat cat dog cat");
        s.handle_key(Key::ctrl('f'));
        assert!(s.prompt.is_some());
        type_text(&mut s, "cat");
        assert_eq!(s.prompt_line().as_deref(), Some("Find all: cat"));
        s.handle_key(Key::special(special::ENTER));

        assert!(s.prompt.is_none());
        assert_eq!(s.message.as_deref(), Some("3 matches found"));
        let matches: Vec<_> = spans(&s, 1)
            .into_iter()
            .filter(|&(_, _, tag)| tag == Tag::Match)
            .collect();
        assert_eq!(
            matches,
            vec![(0, 3, Tag::Match), (4, 7, Tag::Match), (12, 15, Tag::Match)]
        );

        // the prompt reopens with the last needle
        s.handle_key(Key::ctrl('f'));
        assert_eq!(s.prompt.as_ref().map(|p| p.input.as_str()), Some("cat"));
    }

    #[test]
    fn test_find_ignore_case_toggle() {
        let mut s = session();
        s.paste("cat CAT");
        s.handle_key(Key::ctrl('f'));
        s.handle_key(Key::special(special::TAB));
        assert_eq!(s.prompt_line().as_deref(), Some("Find all [ignore case]: "));
        type_text(&mut s, "Cat");
        s.handle_key(Key::special(special::ENTER));
        assert_eq!(s.message.as_deref(), Some("2 matches found"));
    }

    #[test]
    fn test_cancelling_find_clears_matches() {
        let mut s = session();
        s.paste("cat cat");
        s.find_all("cat");
        assert!(s.buffer.tag_names().contains(&Tag::Match));

        s.handle_key(Key::ctrl('f'));
        s.handle_key(Key::special(special::ESCAPE));
        assert!(s.prompt.is_none());
        assert!(!s.buffer.tag_names().contains(&Tag::Match));
    }

    #[test]
    fn test_empty_needle_clears_matches() {
        let mut s = session();
        s.paste("cat");
        s.find_all("cat");
        s.find_all("");
        assert!(!s.buffer.tag_names().contains(&Tag::Match));
        assert_eq!(s.message.as_deref(), Some("0 matches found"));
    }

    #[test]
    fn test_escape_clears_matches() {
        let mut s = session();
        s.paste("cat");
        s.find_all("cat");
        s.handle_key(Key::special(special::ESCAPE));
        assert!(!s.buffer.tag_names().contains(&Tag::Match));
    }

    #[test]
    fn test_save_to_bad_path_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("no").join("such").join("file.py");

        let mut s = session();
        type_text(&mut s, "x = 1");
        s.handle_key(Key::ctrl('s'));
        assert_eq!(s.prompt.as_ref().map(|p| p.action), Some(PromptAction::SaveAs));
        type_text(&mut s, &bad.display().to_string());
        s.handle_key(Key::special(special::ENTER));

        assert!(s.message.as_deref().unwrap_or("").starts_with("I/O error"));
        assert!(s.buffer.filename().is_none());
        assert!(s.buffer.is_modified());
        assert!(s.running);
    }

    #[test]
    fn test_save_as_then_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.py");

        let mut s = session();
        type_text(&mut s, "print(1)");
        s.save_as(path.clone()).unwrap();
        assert!(!s.buffer.is_modified());
        assert_eq!(s.message.as_deref(), Some("Wrote 1 line to out.py"));

        type_text(&mut s, "\nx");
        s.handle_key(Key::ctrl('s'));
        assert!(s.prompt.is_none());
        assert_eq!(s.message.as_deref(), Some("Wrote 2 lines to out.py"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "print(1)\nx");
    }

    #[test]
    fn test_open_and_open_or_create() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.py");
        std::fs::write(&path, "def f():\n    return 1\n").unwrap();

        let mut s = session();
        s.open(&path).unwrap();
        assert_eq!(s.buffer.line_count(), 2);
        assert_eq!(spans(&s, 1), vec![(0, 3, Tag::Keyword1)]);
        assert!(!s.buffer.is_modified());

        let missing = dir.path().join("new.py");
        s.open_or_create(&missing).unwrap();
        assert_eq!(s.buffer.text(), "");
        assert_eq!(s.buffer.filename(), Some(missing.as_path()));

        assert!(matches!(
            s.open(&dir.path().join("gone.py")),
            Err(EditorError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_new_file_resets_document() {
        let mut s = session();
        s.paste("a\nb\nc");
        s.select_all();
        s.execute(CommandId::NewFile);
        assert_eq!(s.buffer.line_count(), 1);
        assert!(s.buffer.tag_names().is_empty());
        assert!(!s.buffer.tag_names().contains(&Tag::Selection));
        assert_eq!(s.mirror.text().lines().count(), 1);
    }

    #[test]
    fn test_select_all_cleared_by_edit() {
        let mut s = session();
        s.paste("x = 1\ny");
        s.handle_key(Key::ctrl('a'));
        assert!(s.buffer.tag_names().contains(&Tag::Selection));
        assert!(spans(&s, 2).contains(&(0, 1, Tag::Selection)));

        type_text(&mut s, "z");
        assert!(!s.buffer.tag_names().contains(&Tag::Selection));
        assert_eq!(spans(&s, 1), vec![(4, 5, Tag::Digit)]);
    }

    #[test]
    fn test_quit_confirmation() {
        let mut s = session();
        s.handle_key(Key::ctrl('q'));
        assert!(!s.running);

        let mut s = session();
        type_text(&mut s, "x");
        s.handle_key(Key::ctrl('q'));
        assert!(s.running);
        assert!(s.message.as_deref().unwrap_or("").contains("C-q"));

        // any other command disarms the confirmation
        s.handle_key(Key::special(special::LEFT));
        s.handle_key(Key::ctrl('q'));
        assert!(s.running);
        s.handle_key(Key::ctrl('q'));
        assert!(!s.running);
    }

    #[test]
    fn test_wheel_scrolls_both_views() {
        let mut s = session();
        s.paste(&"line\n".repeat(100));
        s.execute(CommandId::DocumentStart);
        assert_eq!(s.scroll.content().top_line(), 0);

        s.handle_event(InputEvent::Scroll(ScrollEvent::Wheel { delta: -120 }));
        assert_eq!(s.scroll.content().top_line(), 3);
        assert_eq!(s.scroll.gutter().top_line(), 3);

        s.handle_event(InputEvent::Scroll(ScrollEvent::Scrollbar(0.5)));
        assert!(s.scroll.is_aligned());
        assert_eq!(s.scroll.gutter().top_line(), s.scroll.content().top_line());
    }

    #[test]
    fn test_cursor_follows_edits() {
        let mut s = session();
        s.paste(&"line\n".repeat(30));
        let view = s.scroll.content();
        assert!(view.is_line_visible(30));
        assert!(s.scroll.is_aligned());
    }

    #[test]
    fn test_cursor_info_and_toggle() {
        let mut s = session();
        type_text(&mut s, "ab\nc");
        assert_eq!(s.cursor_info().map(|c| c.status()).as_deref(), Some("Line: 2 | Column: 2"));

        s.handle_key(Key::meta('c'));
        assert_eq!(s.cursor_info(), None);
    }

    #[test]
    fn test_vertical_motion_keeps_goal_column() {
        let mut s = session();
        s.paste("abcdef\nab\nabcdef");
        s.execute(CommandId::DocumentStart);
        s.execute(CommandId::LineEnd);
        s.execute(CommandId::MoveDown);
        assert_eq!(s.buffer.index_of(Mark::Insert), Position::new(2, 2));
        s.execute(CommandId::MoveDown);
        assert_eq!(s.buffer.index_of(Mark::Insert), Position::new(3, 6));
        assert_eq!(s.execute(CommandId::MoveDown), CommandStatus::Failure);
    }

    #[test]
    fn test_click_moves_cursor() {
        let mut s = session();
        s.paste("one\ntwo\nthree");
        let gutter = s.mirror.width();
        s.handle_event(InputEvent::Click { row: 2, col: (gutter + 3) as u16 });
        assert_eq!(s.buffer.index_of(Mark::Insert), Position::new(3, 3));

        // past the last line lands on it
        s.click(8, 0);
        assert_eq!(s.buffer.index_of(Mark::Insert), Position::new(3, 0));
    }

    #[test]
    fn test_goto_prompt() {
        let mut s = session();
        s.paste("a\nbcd\ne");
        s.handle_key(Key::meta('g'));
        type_text(&mut s, "2.2");
        s.handle_key(Key::special(special::ENTER));
        assert_eq!(s.buffer.index_of(Mark::Insert), Position::new(2, 2));

        assert!(s.goto("3").is_ok());
        assert_eq!(s.buffer.index_of(Mark::Insert), Position::new(3, 0));
        assert!(matches!(s.goto("x.1"), Err(EditorError::InvalidPosition(_))));
    }

    #[test]
    fn test_toggles_theme_and_help() {
        let mut s = session();
        let width = s.mirror.width();
        s.handle_key(Key::meta('l'));
        assert_eq!(s.mirror.width(), 0);
        s.handle_key(Key::meta('l'));
        assert_eq!(s.mirror.width(), width);

        s.handle_key(Key::meta('t'));
        assert_eq!(s.config.theme, "Greygarious");

        s.handle_key(Key::function(1));
        assert!(s.message.as_deref().unwrap_or("").contains("C-f find-all"));

        s.handle_key(Key::ctrl('z'));
        assert_eq!(s.message.as_deref(), Some("C-z is not bound"));
    }

    #[test]
    fn test_highlighting_toggle() {
        let mut s = session();
        s.paste("x = 5");
        s.handle_key(Key::meta('h'));
        assert!(s.buffer.tag_names().is_empty());
        s.handle_key(Key::meta('h'));
        assert_eq!(spans(&s, 1), vec![(4, 5, Tag::Digit)]);
    }

    #[test]
    fn test_tab_inserts_spaces_to_stop() {
        let mut s = session();
        type_text(&mut s, "ab");
        s.handle_key(Key::special(special::TAB));
        assert_eq!(s.buffer.text(), "ab  ");
    }
}
