//! Request and response bodies exchanged with the board service.

use boardsync_core::{SyncError, SyncResult};
use boardsync_domain::{Board, BoardId, Card, CardDraft, CardKey, CardPatch};
use serde::{Deserialize, Serialize};

/// `POST /card`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateCardRequest {
    pub board_id: BoardId,
    pub column: String,
    #[serde(flatten)]
    pub card: CardDraft,
}

/// `POST /card/edit`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditCardRequest {
    pub board_id: BoardId,
    pub card_id: CardKey,
    pub column: String,
    #[serde(flatten)]
    pub patch: CardPatch,
}

/// `POST /card/delete`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteCardRequest {
    pub board_id: BoardId,
    pub card_id: CardKey,
    pub column: String,
}

/// `PUT /board`
#[derive(Debug, Serialize)]
pub struct SaveBoardRequest<'a> {
    pub board: &'a Board,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SuccessEnvelope {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

fn default_success() -> bool {
    true
}

/// An empty response body counts as success.
impl Default for SuccessEnvelope {
    fn default() -> Self {
        Self {
            success: true,
            message: None,
        }
    }
}

impl SuccessEnvelope {
    /// A `success: false` envelope is a failed request even under HTTP 200.
    pub fn into_result(self) -> SyncResult<()> {
        if self.success {
            Ok(())
        } else {
            Err(SyncError::transport(
                None,
                self.message
                    .unwrap_or_else(|| "server reported failure".to_string()),
            ))
        }
    }
}

/// Board fetch responses come bare or wrapped in `{ "board": ... }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum BoardResponse {
    Wrapped { board: Board },
    Bare(Board),
}

impl BoardResponse {
    pub fn into_board(self) -> Board {
        match self {
            Self::Wrapped { board } | Self::Bare(board) => board,
        }
    }
}

/// Card responses come bare or wrapped in `{ "card": ... }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CardResponse {
    Wrapped { card: Card },
    Bare(Card),
}

impl CardResponse {
    pub fn into_card(self) -> Card {
        match self {
            Self::Wrapped { card } | Self::Bare(card) => card,
        }
    }
}

/// `POST /card/edit` answers with the updated card or a plain envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum EditResponse {
    Card(CardResponse),
    Envelope(SuccessEnvelope),
}

impl EditResponse {
    pub fn into_card(self) -> SyncResult<Option<Card>> {
        match self {
            Self::Card(card) => Ok(Some(card.into_card())),
            Self::Envelope(envelope) => envelope.into_result().map(|_| None),
        }
    }
}
