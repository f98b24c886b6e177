//! Find-all and selection commands

use crate::editor::{PromptAction, Session};
use crate::error::Result;

use super::CommandStatus;

pub fn find_all(s: &mut Session) -> Result<CommandStatus> {
    s.start_prompt(PromptAction::FindAll);
    Ok(CommandStatus::Success)
}

pub fn clear_matches(s: &mut Session) -> Result<CommandStatus> {
    s.clear_matches();
    Ok(CommandStatus::Success)
}

pub fn select_all(s: &mut Session) -> Result<CommandStatus> {
    s.select_all();
    Ok(CommandStatus::Success)
}
