use boardsync_core::{SyncError, SyncResult};
use boardsync_domain::Board;

/// The signed-in user as seen by the board client.
///
/// Session persistence and token refresh live elsewhere; this only carries
/// what requests and access checks need.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    pub username: Option<String>,
    pub team_id: Option<String>,
    pub token: Option<String>,
}

impl AuthContext {
    pub fn new(username: impl Into<String>, team_id: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            team_id: Some(team_id.into()),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// A board is accessible unless both sides name a team and they differ.
    pub fn can_access(&self, board: &Board) -> bool {
        match (&self.team_id, &board.team) {
            (Some(mine), Some(owner)) => mine == owner,
            _ => true,
        }
    }

    pub fn ensure_access(&self, board: &Board) -> SyncResult<()> {
        if self.can_access(board) {
            Ok(())
        } else {
            Err(SyncError::Authorization(format!(
                "board '{}' belongs to another team",
                board.id
            )))
        }
    }
}
