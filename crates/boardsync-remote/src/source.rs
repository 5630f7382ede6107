use async_trait::async_trait;
use boardsync_core::SyncResult;
use boardsync_domain::{Board, Card};
use std::sync::Arc;

use crate::wire::{CreateCardRequest, DeleteCardRequest, EditCardRequest};

/// Which board document to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardSelector {
    Team(String),
    Board(String),
}

impl BoardSelector {
    pub fn query_pair(&self) -> (&'static str, &str) {
        match self {
            Self::Team(id) => ("team", id.as_str()),
            Self::Board(id) => ("board_id", id.as_str()),
        }
    }
}

/// Remote source of truth for board documents.
///
/// Implementations own transport concerns (auth headers, retries, timeouts);
/// callers only see the eventual success or failure.
#[async_trait]
pub trait BoardDataSource: Send + Sync {
    /// Fetch the current board document
    async fn fetch_board(&self, selector: &BoardSelector) -> SyncResult<Board>;

    /// Create a card and return it as stored by the server
    async fn create_card(&self, request: &CreateCardRequest) -> SyncResult<Card>;

    /// Apply a patch; returns the updated card when the server echoes one
    async fn edit_card(&self, request: &EditCardRequest) -> SyncResult<Option<Card>>;

    async fn delete_card(&self, request: &DeleteCardRequest) -> SyncResult<()>;

    /// Replace the stored board layout with `board`
    async fn save_board(&self, board: &Board) -> SyncResult<()>;
}

#[async_trait]
impl<T: BoardDataSource + ?Sized> BoardDataSource for Arc<T> {
    async fn fetch_board(&self, selector: &BoardSelector) -> SyncResult<Board> {
        (**self).fetch_board(selector).await
    }

    async fn create_card(&self, request: &CreateCardRequest) -> SyncResult<Card> {
        (**self).create_card(request).await
    }

    async fn edit_card(&self, request: &EditCardRequest) -> SyncResult<Option<Card>> {
        (**self).edit_card(request).await
    }

    async fn delete_card(&self, request: &DeleteCardRequest) -> SyncResult<()> {
        (**self).delete_card(request).await
    }

    async fn save_board(&self, board: &Board) -> SyncResult<()> {
        (**self).save_board(board).await
    }
}
