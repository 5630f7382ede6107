//! In-memory stand-in for the board service.

#![allow(dead_code)]

use async_trait::async_trait;
use boardsync_core::{SyncError, SyncResult};
use boardsync_domain::{Board, Card, Column};
use boardsync_remote::{
    BoardDataSource, BoardSelector, CreateCardRequest, DeleteCardRequest, EditCardRequest,
};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Fetch,
    Create,
    Edit,
    Delete,
    Save,
}

#[derive(Default)]
pub struct FakeSource {
    pub server_board: Mutex<Option<Board>>,
    pub calls: Mutex<Vec<Op>>,
    failing: Mutex<HashSet<Op>>,
    forbidden: Mutex<HashSet<Op>>,
    gate: Mutex<Option<Arc<Notify>>>,
    pub echo_edits: Mutex<bool>,
    pub omit_ids: Mutex<bool>,
    next_id: AtomicU32,
}

impl FakeSource {
    pub fn with_board(board: Board) -> Arc<Self> {
        let source = Self::default();
        *source.server_board.lock() = Some(board);
        Arc::new(source)
    }

    pub fn fail(&self, op: Op) {
        self.failing.lock().insert(op);
    }

    pub fn recover(&self, op: Op) {
        self.failing.lock().remove(&op);
    }

    pub fn forbid(&self, op: Op) {
        self.forbidden.lock().insert(op);
    }

    /// Every later call waits until the returned handle is notified.
    pub fn hold(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.gate.lock() = Some(Arc::clone(&notify));
        notify
    }

    pub fn count(&self, op: Op) -> usize {
        self.calls.lock().iter().filter(|call| **call == op).count()
    }

    async fn enter(&self, op: Op) -> SyncResult<()> {
        self.calls.lock().push(op);
        let gate = self.gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if self.forbidden.lock().contains(&op) {
            return Err(SyncError::Authorization("forbidden".to_string()));
        }
        if self.failing.lock().contains(&op) {
            return Err(SyncError::transport(Some(503), "service unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl BoardDataSource for FakeSource {
    async fn fetch_board(&self, _selector: &BoardSelector) -> SyncResult<Board> {
        self.enter(Op::Fetch).await?;
        self.server_board
            .lock()
            .clone()
            .ok_or_else(|| SyncError::transport(Some(404), "no board"))
    }

    async fn create_card(&self, request: &CreateCardRequest) -> SyncResult<Card> {
        self.enter(Op::Create).await?;
        let mut card = request.card.clone().into_card();
        if !*self.omit_ids.lock() {
            let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            card.server_id = Some(format!("srv-{}", n));
            card.card_number = Some(format!("TASK-{}", n));
        }
        Ok(card)
    }

    async fn edit_card(&self, request: &EditCardRequest) -> SyncResult<Option<Card>> {
        self.enter(Op::Edit).await?;
        if !*self.echo_edits.lock() {
            return Ok(None);
        }
        let mut card = Card::new("");
        card.id = Some(request.card_id.to_string());
        card.title = request
            .patch
            .title
            .clone()
            .unwrap_or_else(|| "server title".to_string());
        Ok(Some(card))
    }

    async fn delete_card(&self, _request: &DeleteCardRequest) -> SyncResult<()> {
        self.enter(Op::Delete).await
    }

    async fn save_board(&self, board: &Board) -> SyncResult<()> {
        self.enter(Op::Save).await?;
        *self.server_board.lock() = Some(board.clone());
        Ok(())
    }
}

pub fn sample_board() -> Board {
    Board::new("b1").with_team("t1").with_columns(vec![
        Column::new("To Do").with_cards(vec![
            Card::new("Task 1").with_id("c1"),
            Card::new("Task 2").with_id("c2"),
        ]),
        Column::new("In Progress"),
        Column::new("Done"),
    ])
}

/// Yields until `source` has seen `n` calls of `op`.
pub async fn wait_for_calls(source: &FakeSource, op: Op, n: usize) {
    while source.count(op) < n {
        tokio::task::yield_now().await;
    }
}
