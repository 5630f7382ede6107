use boardsync_core::SyncResult;

use crate::Column;

pub mod card_commands;

pub use card_commands::*;

/// A local mutation of a board's column sequence.
///
/// Commands are applied by the single owner of the columns; each leaves every
/// card key in at most one column.
pub trait Command: Send + Sync {
    /// Execute this command, mutating the columns in `context`
    fn execute(&self, context: &mut CommandContext) -> SyncResult<()>;

    /// Human-readable description of what this command does
    fn description(&self) -> String;
}

pub struct CommandContext<'a> {
    pub columns: &'a mut Vec<Column>,
}

impl<'a> CommandContext<'a> {
    pub fn new(columns: &'a mut Vec<Column>) -> Self {
        Self { columns }
    }

    pub(crate) fn column_mut(&mut self, title: &str) -> SyncResult<&mut Column> {
        self.columns
            .iter_mut()
            .find(|column| column.title == title)
            .ok_or_else(|| boardsync_core::SyncError::NotFound(format!("column '{}'", title)))
    }
}
