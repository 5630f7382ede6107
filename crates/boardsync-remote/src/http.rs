//! REST implementation of [`BoardDataSource`].
//!
//! Requests carry the bearer token from [`AuthContext`] and are retried with
//! exponential backoff on connection failures, 5xx, 408 and 429 responses.

use async_trait::async_trait;
use boardsync_core::{ClientConfig, SyncError, SyncResult};
use boardsync_domain::{Board, Card};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::auth::AuthContext;
use crate::source::{BoardDataSource, BoardSelector};
use crate::wire::{
    BoardResponse, CardResponse, CreateCardRequest, DeleteCardRequest, EditCardRequest,
    EditResponse, SaveBoardRequest, SuccessEnvelope,
};

const BACKOFF_MULTIPLIER: u32 = 2;

#[derive(Debug, Clone)]
pub struct HttpBoardDataSource {
    client: Client,
    base_url: String,
    auth: AuthContext,
    max_retries: u32,
    base_delay: Duration,
}

impl HttpBoardDataSource {
    pub fn new(config: &ClientConfig, auth: AuthContext) -> SyncResult<Self> {
        let base = Url::parse(&config.base_url).map_err(|e| {
            SyncError::Config(format!("invalid base_url '{}': {}", config.base_url, e))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(SyncError::Config(format!(
                "unsupported base_url scheme '{}'",
                base.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| SyncError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base.as_str().trim_end_matches('/').to_string(),
            auth,
            max_retries: config.max_retries,
            base_delay: config.retry_base_delay(),
        })
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.endpoint(path));
        match &self.auth.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends a request built by `build`, retrying transient failures.
    async fn send<T, F>(&self, what: &str, build: F) -> SyncResult<T>
    where
        T: DeserializeOwned,
        F: Fn() -> RequestBuilder,
    {
        let mut attempt = 0;
        loop {
            match self.send_once(build()).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    let delay = self.base_delay * BACKOFF_MULTIPLIER.pow(attempt);
                    warn!(
                        "{} failed (attempt {}/{}): {}; retrying in {:?}",
                        what,
                        attempt + 1,
                        self.max_retries + 1,
                        e,
                        delay
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn send_once<T: DeserializeOwned>(&self, request: RequestBuilder) -> SyncResult<T> {
        let response = request
            .send()
            .await
            .map_err(|e| SyncError::transport(None, e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| SyncError::transport(Some(status.as_u16()), e.to_string()))?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &body
        };
        serde_json::from_slice(body).map_err(|e| SyncError::Serialization(e.to_string()))
    }

    fn json_request<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> SyncResult<impl Fn() -> RequestBuilder + '_> {
        let payload =
            serde_json::to_value(body).map_err(|e| SyncError::Serialization(e.to_string()))?;
        let path = path.to_string();
        Ok(move || self.request(method.clone(), &path).json(&payload))
    }
}

fn status_error(status: StatusCode, body: &[u8]) -> SyncError {
    let message = serde_json::from_slice::<SuccessEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SyncError::Authorization(message),
        _ => SyncError::transport(Some(status.as_u16()), message),
    }
}

#[async_trait]
impl BoardDataSource for HttpBoardDataSource {
    #[instrument(skip(self))]
    async fn fetch_board(&self, selector: &BoardSelector) -> SyncResult<Board> {
        let (key, value) = selector.query_pair();
        let response: BoardResponse = self
            .send("fetch board", || {
                self.request(Method::GET, "board").query(&[(key, value)])
            })
            .await?;
        let board = response.into_board();
        info!(
            "Fetched board {} ({} columns, {} cards)",
            board.id,
            board.columns.len(),
            board.card_count()
        );
        Ok(board)
    }

    #[instrument(skip(self, request), fields(board = %request.board_id, column = %request.column))]
    async fn create_card(&self, request: &CreateCardRequest) -> SyncResult<Card> {
        let build = self.json_request(Method::POST, "card", request)?;
        let response: CardResponse = self.send("create card", build).await?;
        let card = response.into_card();
        debug!("Server created card {}", card.key());
        Ok(card)
    }

    #[instrument(skip(self, request), fields(card = %request.card_id))]
    async fn edit_card(&self, request: &EditCardRequest) -> SyncResult<Option<Card>> {
        let build = self.json_request(Method::POST, "card/edit", request)?;
        let response: EditResponse = self.send("edit card", build).await?;
        response.into_card()
    }

    #[instrument(skip(self, request), fields(card = %request.card_id))]
    async fn delete_card(&self, request: &DeleteCardRequest) -> SyncResult<()> {
        let build = self.json_request(Method::POST, "card/delete", request)?;
        let response: Option<SuccessEnvelope> = self.send("delete card", build).await?;
        response.unwrap_or_default().into_result()
    }

    #[instrument(skip(self, board), fields(board = %board.id))]
    async fn save_board(&self, board: &Board) -> SyncResult<()> {
        let build = self.json_request(Method::PUT, "board", &SaveBoardRequest { board })?;
        let response: Option<SuccessEnvelope> = self.send("save board", build).await?;
        response.unwrap_or_default().into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardsync_domain::{CardDraft, CardKey, CardPatch, Column, FieldUpdate};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source(server: &MockServer, max_retries: u32) -> HttpBoardDataSource {
        let config = ClientConfig {
            base_url: format!("{}/api/", server.uri()),
            max_retries,
            retry_base_delay_ms: 1,
            ..ClientConfig::default()
        };
        HttpBoardDataSource::new(&config, AuthContext::new("alice", "t1").with_token("tok"))
            .unwrap()
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let config = ClientConfig {
            base_url: "ftp://example.com".to_string(),
            ..ClientConfig::default()
        };
        assert!(matches!(
            HttpBoardDataSource::new(&config, AuthContext::default()),
            Err(SyncError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_board_by_team_with_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/board"))
            .and(query_param("team", "t1"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_id": "b1",
                "team": "t1",
                "columns": [{ "title": "To Do", "cards": [{ "_id": "c1", "title": "Task 1" }] }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let board = source(&server, 0)
            .fetch_board(&BoardSelector::Team("t1".to_string()))
            .await
            .unwrap();

        assert_eq!(board.id, "b1");
        assert_eq!(board.locate(&CardKey::from("c1")), Some("To Do"));
    }

    #[tokio::test]
    async fn test_create_card_posts_draft() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/card"))
            .and(body_partial_json(json!({ "board_id": "b1", "column": "To Do", "title": "Task" })))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({ "card": { "_id": "c9", "title": "Task" } })),
            )
            .mount(&server)
            .await;

        let card = source(&server, 0)
            .create_card(&CreateCardRequest {
                board_id: "b1".to_string(),
                column: "To Do".to_string(),
                card: CardDraft::new("Task"),
            })
            .await
            .unwrap();

        assert_eq!(card.key().as_str(), "c9");
    }

    #[tokio::test]
    async fn test_edit_card_envelope_without_card() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/card/edit"))
            .and(body_partial_json(json!({ "card_id": "c1", "assignee": null })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .mount(&server)
            .await;

        let updated = source(&server, 0)
            .edit_card(&EditCardRequest {
                board_id: "b1".to_string(),
                card_id: CardKey::from("c1"),
                column: "To Do".to_string(),
                patch: CardPatch::new().assignee(FieldUpdate::Clear),
            })
            .await
            .unwrap();

        assert_eq!(updated, None);
    }

    #[tokio::test]
    async fn test_delete_card_failure_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/card/delete"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "success": false, "message": "card locked" })),
            )
            .mount(&server)
            .await;

        let result = source(&server, 0)
            .delete_card(&DeleteCardRequest {
                board_id: "b1".to_string(),
                card_id: CardKey::from("c1"),
                column: "To Do".to_string(),
            })
            .await;

        match result {
            Err(SyncError::Transport { message, .. }) => assert_eq!(message, "card locked"),
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_save_board_accepts_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/board"))
            .and(body_partial_json(json!({ "board": { "id": "b1" } })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let board = Board::new("b1").with_columns(vec![Column::new("To Do")]);
        source(&server, 0).save_board(&board).await.unwrap();
    }

    #[tokio::test]
    async fn test_forbidden_maps_to_authorization() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/board"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(json!({ "message": "not a member" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = source(&server, 3)
            .fetch_board(&BoardSelector::Board("b1".to_string()))
            .await;

        match result {
            Err(SyncError::Authorization(message)) => assert_eq!(message, "not a member"),
            other => panic!("expected authorization error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_retries_server_errors_then_succeeds() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/board"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/board"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "b1" })))
            .expect(1)
            .mount(&server)
            .await;

        let board = source(&server, 2)
            .fetch_board(&BoardSelector::Board("b1".to_string()))
            .await
            .unwrap();
        assert_eq!(board.id, "b1");
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/board"))
            .respond_with(ResponseTemplate::new(429))
            .expect(3)
            .mount(&server)
            .await;

        let result = source(&server, 2)
            .fetch_board(&BoardSelector::Board("b1".to_string()))
            .await;
        assert!(matches!(
            result,
            Err(SyncError::Transport {
                status: Some(429),
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/card"))
            .respond_with(ResponseTemplate::new(400))
            .expect(1)
            .mount(&server)
            .await;

        let result = source(&server, 3)
            .create_card(&CreateCardRequest {
                board_id: "b1".to_string(),
                column: "To Do".to_string(),
                card: CardDraft::new("Task"),
            })
            .await;
        assert!(matches!(
            result,
            Err(SyncError::Transport {
                status: Some(400),
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_malformed_body_is_serialization_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/board"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let result = source(&server, 0)
            .fetch_board(&BoardSelector::Board("b1".to_string()))
            .await;
        assert!(matches!(result, Err(SyncError::Serialization(_))));
    }
}
