//! Editing commands

use crate::editor::Session;
use crate::error::Result;

use super::{status, CommandStatus};

pub fn newline(s: &mut Session) -> Result<CommandStatus> {
    s.insert_newline();
    Ok(CommandStatus::Success)
}

pub fn backspace(s: &mut Session) -> Result<CommandStatus> {
    Ok(status(s.delete_backward()))
}

pub fn delete_forward(s: &mut Session) -> Result<CommandStatus> {
    Ok(status(s.delete_forward()))
}

pub fn insert_tab(s: &mut Session) -> Result<CommandStatus> {
    s.insert_tab();
    Ok(CommandStatus::Success)
}
