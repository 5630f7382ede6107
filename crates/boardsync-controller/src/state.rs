use boardsync_core::{SyncError, SyncResult};
use boardsync_domain::board::locate_in;
use boardsync_domain::commands::{Command, CommandContext};
use boardsync_domain::{Board, BoardId, Card, CardKey, Column, FilterSelection};
use boardsync_remote::BoardSelector;

/// Identity of one rendered snapshot of a board.
///
/// The generation increases on every load, so anything keyed on a `ViewKey`
/// (drag-and-drop containers in particular) is rebuilt against fresh data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewKey {
    pub board_id: BoardId,
    pub generation: u64,
}

/// Locally owned copy of a board plus view state.
#[derive(Debug, Default)]
pub(crate) struct BoardState {
    pub board: Option<Board>,
    pub filter: FilterSelection,
    pub generation: u64,
    pub selector: Option<BoardSelector>,
}

impl BoardState {
    pub fn replace(&mut self, board: Board) -> ViewKey {
        self.generation += 1;
        let view = ViewKey {
            board_id: board.id.clone(),
            generation: self.generation,
        };
        self.board = Some(board);
        view
    }

    pub fn view_key(&self) -> Option<ViewKey> {
        self.board.as_ref().map(|board| ViewKey {
            board_id: board.id.clone(),
            generation: self.generation,
        })
    }

    pub fn columns(&self) -> &[Column] {
        self.board
            .as_ref()
            .map(|board| board.columns.as_slice())
            .unwrap_or_default()
    }

    pub fn board_id(&self) -> SyncResult<BoardId> {
        self.board
            .as_ref()
            .map(|board| board.id.clone())
            .ok_or_else(|| SyncError::NotFound("no board loaded".to_string()))
    }

    pub fn require_column(&self, title: &str) -> SyncResult<()> {
        if self.columns().iter().any(|column| column.title == title) {
            Ok(())
        } else {
            Err(SyncError::NotFound(format!("column '{}'", title)))
        }
    }

    pub fn locate(&self, key: &CardKey) -> Option<&str> {
        locate_in(self.columns(), key)
    }

    /// Title of the column holding `key`, or `NotFound`.
    pub fn require_card(&self, key: &CardKey) -> SyncResult<&str> {
        self.locate(key)
            .ok_or_else(|| SyncError::NotFound(format!("card '{}'", key)))
    }

    pub fn card(&self, key: &CardKey) -> Option<&Card> {
        self.columns().iter().find_map(|column| column.card(key))
    }

    pub fn execute(&mut self, command: &dyn Command) -> SyncResult<()> {
        let board = self
            .board
            .as_mut()
            .ok_or_else(|| SyncError::NotFound("no board loaded".to_string()))?;
        tracing::debug!("Executing: {}", command.description());
        command.execute(&mut CommandContext::new(&mut board.columns))
    }
}
