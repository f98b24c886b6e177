//! Command dispatch
//!
//! Every editor action is a `CommandId`. The id resolves to its handler
//! through a `match`, and the key table maps keys to ids. Names are only
//! used to describe bindings and to read overrides from the config file.

mod editing;
mod files;
mod misc;
mod navigation;
mod search;

use std::collections::HashMap;

use tracing::warn;

use crate::editor::Session;
use crate::error::Result;
use crate::input::{special, Key};

/// Command result status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    Failure,
    Abort,
}

/// Command function signature
pub type CommandFn = fn(&mut Session) -> Result<CommandStatus>;

/// Every bindable editor action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    NewFile,
    OpenFile,
    Save,
    SaveAs,
    Quit,
    FindAll,
    ClearMatches,
    SelectAll,
    ToggleLineNumbers,
    ToggleCursorInfo,
    ToggleHighlighting,
    CycleTheme,
    Help,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    LineStart,
    LineEnd,
    PageUp,
    PageDown,
    DocumentStart,
    DocumentEnd,
    GotoPosition,
    Newline,
    Backspace,
    DeleteForward,
    InsertTab,
}

impl CommandId {
    /// Every command, in help order
    pub const ALL: [CommandId; 28] = [
        CommandId::Help,
        CommandId::NewFile,
        CommandId::OpenFile,
        CommandId::Save,
        CommandId::SaveAs,
        CommandId::Quit,
        CommandId::FindAll,
        CommandId::ClearMatches,
        CommandId::SelectAll,
        CommandId::ToggleLineNumbers,
        CommandId::ToggleCursorInfo,
        CommandId::ToggleHighlighting,
        CommandId::CycleTheme,
        CommandId::MoveUp,
        CommandId::MoveDown,
        CommandId::MoveLeft,
        CommandId::MoveRight,
        CommandId::LineStart,
        CommandId::LineEnd,
        CommandId::PageUp,
        CommandId::PageDown,
        CommandId::DocumentStart,
        CommandId::DocumentEnd,
        CommandId::GotoPosition,
        CommandId::Newline,
        CommandId::Backspace,
        CommandId::DeleteForward,
        CommandId::InsertTab,
    ];

    /// The function implementing this command
    pub fn handler(self) -> CommandFn {
        match self {
            CommandId::NewFile => files::new_file,
            CommandId::OpenFile => files::open_file,
            CommandId::Save => files::save_file,
            CommandId::SaveAs => files::save_as,
            CommandId::Quit => files::quit,
            CommandId::FindAll => search::find_all,
            CommandId::ClearMatches => search::clear_matches,
            CommandId::SelectAll => search::select_all,
            CommandId::ToggleLineNumbers => misc::toggle_line_numbers,
            CommandId::ToggleCursorInfo => misc::toggle_cursor_info,
            CommandId::ToggleHighlighting => misc::toggle_highlighting,
            CommandId::CycleTheme => misc::cycle_theme,
            CommandId::Help => misc::help,
            CommandId::MoveUp => navigation::move_up,
            CommandId::MoveDown => navigation::move_down,
            CommandId::MoveLeft => navigation::move_left,
            CommandId::MoveRight => navigation::move_right,
            CommandId::LineStart => navigation::line_start,
            CommandId::LineEnd => navigation::line_end,
            CommandId::PageUp => navigation::page_up,
            CommandId::PageDown => navigation::page_down,
            CommandId::DocumentStart => navigation::document_start,
            CommandId::DocumentEnd => navigation::document_end,
            CommandId::GotoPosition => navigation::goto_position,
            CommandId::Newline => editing::newline,
            CommandId::Backspace => editing::backspace,
            CommandId::DeleteForward => editing::delete_forward,
            CommandId::InsertTab => editing::insert_tab,
        }
    }

    /// Name used in help and in the config `[keys]` table
    pub fn name(self) -> &'static str {
        match self {
            CommandId::NewFile => "new-file",
            CommandId::OpenFile => "open-file",
            CommandId::Save => "save-file",
            CommandId::SaveAs => "save-as",
            CommandId::Quit => "quit",
            CommandId::FindAll => "find-all",
            CommandId::ClearMatches => "clear-matches",
            CommandId::SelectAll => "select-all",
            CommandId::ToggleLineNumbers => "toggle-line-numbers",
            CommandId::ToggleCursorInfo => "toggle-cursor-info",
            CommandId::ToggleHighlighting => "toggle-highlighting",
            CommandId::CycleTheme => "cycle-theme",
            CommandId::Help => "help",
            CommandId::MoveUp => "previous-line",
            CommandId::MoveDown => "next-line",
            CommandId::MoveLeft => "backward-char",
            CommandId::MoveRight => "forward-char",
            CommandId::LineStart => "beginning-of-line",
            CommandId::LineEnd => "end-of-line",
            CommandId::PageUp => "previous-page",
            CommandId::PageDown => "next-page",
            CommandId::DocumentStart => "beginning-of-file",
            CommandId::DocumentEnd => "end-of-file",
            CommandId::GotoPosition => "goto-line",
            CommandId::Newline => "newline",
            CommandId::Backspace => "delete-previous-char",
            CommandId::DeleteForward => "delete-next-char",
            CommandId::InsertTab => "insert-tab",
        }
    }

    /// Look a command up by name
    pub fn from_name(name: &str) -> Option<Self> {
        CommandId::ALL.into_iter().find(|id| id.name() == name)
    }

    /// Whether the command is shown by the help key
    fn in_help(self) -> bool {
        !matches!(
            self,
            CommandId::MoveUp
                | CommandId::MoveDown
                | CommandId::MoveLeft
                | CommandId::MoveRight
                | CommandId::Newline
                | CommandId::Backspace
                | CommandId::DeleteForward
                | CommandId::InsertTab
        )
    }
}

/// Key binding table
pub struct KeyTable {
    bindings: HashMap<u32, CommandId>,
}

impl KeyTable {
    /// Create an empty key table
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Create key table with default bindings
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.setup_defaults();
        table
    }

    /// Add a key binding
    pub fn bind(&mut self, key: Key, id: CommandId) {
        self.bindings.insert(key.code(), id);
    }

    /// Look up the command bound to a key
    pub fn lookup(&self, key: Key) -> Option<CommandId> {
        self.bindings.get(&key.code()).copied()
    }

    /// Keys bound to a command, sorted by name
    pub fn keys_for(&self, id: CommandId) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, bound)| **bound == id)
            .map(|(code, _)| Key(*code).display_name())
            .collect();
        keys.sort();
        keys
    }

    /// One-line summary of the main bindings
    pub fn describe(&self) -> String {
        CommandId::ALL
            .into_iter()
            .filter(|id| id.in_help())
            .filter_map(|id| {
                let keys = self.keys_for(id);
                (!keys.is_empty()).then(|| format!("{} {}", keys.join("/"), id.name()))
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Apply `key = command` overrides. Bad entries are logged and skipped;
    /// the number applied is returned.
    pub fn apply_overrides(&mut self, overrides: &[(String, String)]) -> usize {
        let mut applied = 0;
        for (key_name, command_name) in overrides {
            let Some(key) = Key::parse(key_name) else {
                warn!(key = %key_name, "unknown key in [keys]");
                continue;
            };
            let Some(id) = CommandId::from_name(command_name) else {
                warn!(command = %command_name, "unknown command in [keys]");
                continue;
            };
            self.bind(key, id);
            applied += 1;
        }
        applied
    }

    /// Setup default key bindings
    fn setup_defaults(&mut self) {
        // Files
        self.bind(Key::ctrl('n'), CommandId::NewFile);
        self.bind(Key::ctrl('o'), CommandId::OpenFile);
        self.bind(Key::ctrl('s'), CommandId::Save);
        self.bind(Key::meta('s'), CommandId::SaveAs);
        self.bind(Key::ctrl('q'), CommandId::Quit);

        // Search and selection
        self.bind(Key::ctrl('f'), CommandId::FindAll);
        self.bind(Key::special(special::ESCAPE), CommandId::ClearMatches);
        self.bind(Key::ctrl('a'), CommandId::SelectAll);

        // View
        self.bind(Key::meta('l'), CommandId::ToggleLineNumbers);
        self.bind(Key::meta('c'), CommandId::ToggleCursorInfo);
        self.bind(Key::meta('h'), CommandId::ToggleHighlighting);
        self.bind(Key::meta('t'), CommandId::CycleTheme);
        self.bind(Key::function(1), CommandId::Help);

        // Motion
        self.bind(Key::special(special::UP), CommandId::MoveUp);
        self.bind(Key::special(special::DOWN), CommandId::MoveDown);
        self.bind(Key::special(special::LEFT), CommandId::MoveLeft);
        self.bind(Key::special(special::RIGHT), CommandId::MoveRight);
        self.bind(Key::special(special::HOME), CommandId::LineStart);
        self.bind(Key::special(special::END), CommandId::LineEnd);
        self.bind(Key::special(special::PAGE_UP), CommandId::PageUp);
        self.bind(Key::special(special::PAGE_DOWN), CommandId::PageDown);
        self.bind(Key::special(special::HOME).with_ctrl(), CommandId::DocumentStart);
        self.bind(Key::special(special::END).with_ctrl(), CommandId::DocumentEnd);
        self.bind(Key::meta('g'), CommandId::GotoPosition);

        // Editing
        self.bind(Key::special(special::ENTER), CommandId::Newline);
        self.bind(Key::special(special::BACKSPACE), CommandId::Backspace);
        self.bind(Key::special(special::DELETE), CommandId::DeleteForward);
        self.bind(Key::special(special::TAB), CommandId::InsertTab);
    }
}

impl Default for KeyTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Success when something changed, Failure otherwise
fn status(moved: bool) -> CommandStatus {
    if moved {
        CommandStatus::Success
    } else {
        CommandStatus::Failure
    }
}
