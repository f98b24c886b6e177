//! File commands

use crate::editor::{PromptAction, Session};
use crate::error::Result;

use super::CommandStatus;

pub fn new_file(s: &mut Session) -> Result<CommandStatus> {
    s.new_file();
    Ok(CommandStatus::Success)
}

pub fn open_file(s: &mut Session) -> Result<CommandStatus> {
    s.start_prompt(PromptAction::OpenFile);
    Ok(CommandStatus::Success)
}

pub fn save_file(s: &mut Session) -> Result<CommandStatus> {
    if s.buffer.filename().is_none() {
        s.start_prompt(PromptAction::SaveAs);
        return Ok(CommandStatus::Success);
    }
    s.save()?;
    Ok(CommandStatus::Success)
}

pub fn save_as(s: &mut Session) -> Result<CommandStatus> {
    s.start_prompt(PromptAction::SaveAs);
    Ok(CommandStatus::Success)
}

pub fn quit(s: &mut Session) -> Result<CommandStatus> {
    Ok(if s.request_quit() {
        CommandStatus::Success
    } else {
        CommandStatus::Abort
    })
}
