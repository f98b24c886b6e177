//! Cursor motion commands

use crate::editor::{PromptAction, Session};
use crate::error::Result;

use super::{status, CommandStatus};

pub fn move_up(s: &mut Session) -> Result<CommandStatus> {
    Ok(status(s.move_vertical(-1)))
}

pub fn move_down(s: &mut Session) -> Result<CommandStatus> {
    Ok(status(s.move_vertical(1)))
}

pub fn move_left(s: &mut Session) -> Result<CommandStatus> {
    Ok(status(s.move_left()))
}

pub fn move_right(s: &mut Session) -> Result<CommandStatus> {
    Ok(status(s.move_right()))
}

pub fn line_start(s: &mut Session) -> Result<CommandStatus> {
    s.move_to_line_start();
    Ok(CommandStatus::Success)
}

pub fn line_end(s: &mut Session) -> Result<CommandStatus> {
    s.move_to_line_end();
    Ok(CommandStatus::Success)
}

pub fn page_up(s: &mut Session) -> Result<CommandStatus> {
    let page = s.page_size() as isize;
    Ok(status(s.move_vertical(-page)))
}

pub fn page_down(s: &mut Session) -> Result<CommandStatus> {
    let page = s.page_size() as isize;
    Ok(status(s.move_vertical(page)))
}

pub fn document_start(s: &mut Session) -> Result<CommandStatus> {
    s.move_to_document_start();
    Ok(CommandStatus::Success)
}

pub fn document_end(s: &mut Session) -> Result<CommandStatus> {
    s.move_to_document_end();
    Ok(CommandStatus::Success)
}

pub fn goto_position(s: &mut Session) -> Result<CommandStatus> {
    s.start_prompt(PromptAction::GotoPosition);
    Ok(CommandStatus::Success)
}
