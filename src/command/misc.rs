//! View toggles and help

use crate::editor::Session;
use crate::error::Result;

use super::CommandStatus;

pub fn toggle_line_numbers(s: &mut Session) -> Result<CommandStatus> {
    s.mirror.toggle();
    Ok(CommandStatus::Success)
}

pub fn toggle_cursor_info(s: &mut Session) -> Result<CommandStatus> {
    s.show_cursor_info = !s.show_cursor_info;
    Ok(CommandStatus::Success)
}

pub fn toggle_highlighting(s: &mut Session) -> Result<CommandStatus> {
    s.toggle_highlighting();
    Ok(CommandStatus::Success)
}

pub fn cycle_theme(s: &mut Session) -> Result<CommandStatus> {
    s.cycle_theme();
    Ok(CommandStatus::Success)
}

pub fn help(s: &mut Session) -> Result<CommandStatus> {
    let text = s.keytab.describe();
    s.set_message(text);
    Ok(CommandStatus::Success)
}
