//! Local, optimistic owner of one board's columns and cards.
//!
//! Add, edit and delete are confirm-then-apply: local state changes only after
//! the server accepts the request, and stays untouched on any error. Moves are
//! applied immediately and persisted afterwards; a failed persist is reported
//! but not rolled back unless re-fetching is enabled.
//!
//! State sits behind a mutex that is never held across a request, so a reload
//! may land while a mutation is in flight. When the response arrives and its
//! target is gone, the mutation is dropped without error.

use boardsync_core::{ClientConfig, Editable, SyncError, SyncResult};
use boardsync_domain::commands::{AppendCard, Command, MoveCard, RemoveCard, ReplaceCardFields};
use boardsync_domain::filter::filter_columns;
use boardsync_domain::{
    AssigneeSummary, Board, CardDraft, CardFields, CardKey, CardPatch, Column, FilterSelection,
};
use boardsync_remote::{
    AuthContext, BoardDataSource, BoardSelector, CreateCardRequest, DeleteCardRequest,
    EditCardRequest,
};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::events::BoardEvent;
use crate::state::{BoardState, ViewKey};

const EVENT_CHANNEL_CAPACITY: usize = 64;

pub struct BoardStateController<D> {
    source: Arc<D>,
    auth: AuthContext,
    state: Arc<Mutex<BoardState>>,
    events: broadcast::Sender<BoardEvent>,
    refetch_on_failed_move: bool,
}

impl<D> Clone for BoardStateController<D> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            auth: self.auth.clone(),
            state: Arc::clone(&self.state),
            events: self.events.clone(),
            refetch_on_failed_move: self.refetch_on_failed_move,
        }
    }
}

impl<D: BoardDataSource> BoardStateController<D> {
    pub fn new(source: D, auth: AuthContext) -> Self {
        Self::with_shared_source(Arc::new(source), auth)
    }

    pub fn with_shared_source(source: Arc<D>, auth: AuthContext) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            source,
            auth,
            state: Arc::new(Mutex::new(BoardState::default())),
            events,
            refetch_on_failed_move: false,
        }
    }

    pub fn with_config(mut self, config: &ClientConfig) -> Self {
        self.refetch_on_failed_move = config.refetch_on_failed_move;
        self
    }

    pub fn with_refetch_on_failed_move(mut self, enabled: bool) -> Self {
        self.refetch_on_failed_move = enabled;
        self
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: BoardEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    /// Replaces local state with a freshly fetched board and starts a new generation.
    pub fn load(&self, board: Board) -> ViewKey {
        let duplicates = board.duplicate_column_titles();
        if !duplicates.is_empty() {
            warn!(
                "Board {} has duplicate column titles {:?}; only the first of each is addressable",
                board.id, duplicates
            );
        }
        let view = self.state.lock().replace(board);
        debug!(
            "Loaded board {} at generation {}",
            view.board_id, view.generation
        );
        self.emit(BoardEvent::Loaded { view: view.clone() });
        view
    }

    /// Fetches the board from the data source and loads it.
    pub async fn refresh(&self, selector: BoardSelector) -> SyncResult<ViewKey> {
        let board = self.source.fetch_board(&selector).await?;
        self.auth.ensure_access(&board)?;
        self.state.lock().selector = Some(selector);
        Ok(self.load(board))
    }

    pub fn board(&self) -> Option<Board> {
        self.state.lock().board.clone()
    }

    pub fn columns(&self) -> Vec<Column> {
        self.state.lock().columns().to_vec()
    }

    pub fn generation(&self) -> u64 {
        self.state.lock().generation
    }

    pub fn view_key(&self) -> Option<ViewKey> {
        self.state.lock().view_key()
    }

    /// Runs a column command against current state. A missing target means a
    /// reload replaced the board while the request was in flight; that is
    /// logged and reported as `false`.
    fn apply_confirmed(&self, command: &dyn Command) -> bool {
        match self.state.lock().execute(command) {
            Ok(()) => true,
            Err(e) => {
                debug!("Dropping confirmed change ({}): {}", command.description(), e);
                false
            }
        }
    }

    pub async fn add_card(&self, column_title: &str, draft: CardDraft) -> SyncResult<CardKey> {
        if let Err(e) = draft.validate() {
            debug!("Rejected new card for '{}': {}", column_title, e);
            return Err(e);
        }

        let board_id = {
            let state = self.state.lock();
            state.require_column(column_title)?;
            state.board_id()?
        };

        let request = CreateCardRequest {
            board_id,
            column: column_title.to_string(),
            card: draft,
        };
        let mut card = self.source.create_card(&request).await?;
        if !card.has_identity() {
            warn!("Server returned card '{}' without an id", card.title);
            card.ensure_identity();
        }
        let key = card.key();

        let command = AppendCard {
            column_title: column_title.to_string(),
            card,
        };
        if self.apply_confirmed(&command) {
            info!("Added card {} to '{}'", key, column_title);
            self.emit(BoardEvent::CardAdded {
                column: column_title.to_string(),
                key: key.clone(),
            });
        }
        Ok(key)
    }

    pub async fn edit_card(&self, key: &CardKey, patch: CardPatch) -> SyncResult<()> {
        if let Err(e) = patch.validate() {
            debug!("Rejected edit of card {}: {}", key, e);
            return Err(e);
        }

        let (board_id, column) = {
            let state = self.state.lock();
            let column = state.require_card(key)?.to_string();
            (state.board_id()?, column)
        };

        let request = EditCardRequest {
            board_id,
            card_id: key.clone(),
            column,
            patch,
        };
        let updated = self.source.edit_card(&request).await?;

        let applied = {
            let mut state = self.state.lock();
            let fields = match updated {
                Some(card) => Some(CardFields::from_entity(&card)),
                None => state.card(key).map(|current| {
                    let mut card = current.clone();
                    request.patch.clone().apply_to(&mut card);
                    CardFields::from_entity(&card)
                }),
            };
            match fields {
                Some(fields) => {
                    let command = ReplaceCardFields {
                        key: key.clone(),
                        fields,
                    };
                    state.execute(&command).is_ok()
                }
                None => false,
            }
        };

        if applied {
            info!("Edited card {}", key);
            self.emit(BoardEvent::CardEdited { key: key.clone() });
        } else {
            debug!("Card {} disappeared before its edit was confirmed", key);
        }
        Ok(())
    }

    pub async fn delete_card(&self, key: &CardKey, column_title: &str) -> SyncResult<()> {
        let board_id = {
            let state = self.state.lock();
            state.require_column(column_title)?;
            state.require_card(key)?;
            state.board_id()?
        };

        let request = DeleteCardRequest {
            board_id,
            card_id: key.clone(),
            column: column_title.to_string(),
        };
        self.source.delete_card(&request).await?;

        let holder = {
            let state = self.state.lock();
            let in_named_column = state
                .columns()
                .iter()
                .any(|column| column.title == column_title && column.position_of(key).is_some());
            if in_named_column {
                Some(column_title.to_string())
            } else {
                state.locate(key).map(str::to_string)
            }
        };

        let removed = holder.is_some_and(|column| {
            self.apply_confirmed(&RemoveCard {
                column_title: column,
                key: key.clone(),
            })
        });
        if removed {
            info!("Deleted card {}", key);
            self.emit(BoardEvent::CardDeleted {
                column: column_title.to_string(),
                key: key.clone(),
            });
        }
        Ok(())
    }

    /// Completes a drag gesture.
    ///
    /// The card is moved locally before the layout is sent to the server, so
    /// the move is visible immediately. A failed persist is returned but the
    /// local move stays unless re-fetching on failure is enabled.
    pub async fn move_card(
        &self,
        key: &CardKey,
        source_title: &str,
        destination_title: &str,
    ) -> SyncResult<()> {
        if source_title == destination_title {
            self.state.lock().require_card(key)?;
            debug!("Card {} dropped back onto '{}'", key, source_title);
            self.emit(BoardEvent::CardMoved {
                key: key.clone(),
                from: source_title.to_string(),
                to: destination_title.to_string(),
            });
            return Ok(());
        }

        let layout = {
            let mut state = self.state.lock();
            state.execute(&MoveCard {
                key: key.clone(),
                destination: destination_title.to_string(),
            })?;
            state.board.clone()
        };
        let layout = layout.ok_or_else(|| SyncError::NotFound("no board loaded".to_string()))?;

        self.emit(BoardEvent::CardMoved {
            key: key.clone(),
            from: source_title.to_string(),
            to: destination_title.to_string(),
        });

        match self.source.save_board(&layout).await {
            Ok(()) => {
                info!(
                    "Moved card {} from '{}' to '{}'",
                    key, source_title, destination_title
                );
                Ok(())
            }
            Err(e) => {
                warn!("Failed to persist move of card {}: {}", key, e);
                self.emit(BoardEvent::MovePersistFailed {
                    key: key.clone(),
                    message: e.to_string(),
                });
                if self.refetch_on_failed_move {
                    self.refetch_after_failed_move().await;
                }
                Err(e)
            }
        }
    }

    async fn refetch_after_failed_move(&self) {
        let selector = self.state.lock().selector.clone();
        let Some(selector) = selector else {
            warn!("Cannot re-fetch board after failed move: it was never fetched");
            return;
        };
        if let Err(e) = self.refresh(selector).await {
            warn!("Re-fetch after failed move also failed: {}", e);
        }
    }

    pub fn filter(&self) -> FilterSelection {
        self.state.lock().filter.clone()
    }

    pub fn set_filter(&self, selection: FilterSelection) {
        self.state.lock().filter = selection;
        self.emit(BoardEvent::FilterChanged);
    }

    /// Returns whether `username` is selected after the toggle.
    pub fn toggle_filter_user(&self, username: &str) -> bool {
        let selected = self.state.lock().filter.toggle(username);
        self.emit(BoardEvent::FilterChanged);
        selected
    }

    pub fn clear_filter(&self) {
        self.state.lock().filter.clear();
        self.emit(BoardEvent::FilterChanged);
    }

    /// Columns as they should be rendered under the current filter.
    pub fn visible_columns(&self) -> Vec<Column> {
        let state = self.state.lock();
        if state.filter.is_empty() {
            state.columns().to_vec()
        } else {
            filter_columns(state.columns(), &state.filter)
        }
    }

    pub fn available_assignees(&self) -> AssigneeSummary {
        AssigneeSummary::from_columns(self.state.lock().columns())
    }
}
