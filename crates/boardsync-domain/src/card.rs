use boardsync_core::{SyncError, SyncResult};
use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

/// Assignee value the server uses for "nobody".
pub const UNASSIGNED_ASSIGNEE: &str = "unassigned";

const TEMP_KEY_PREFIX: &str = "tmp-";

/// Identity of a card within a board, stable across renders and moves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardKey(String);

impl CardKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// `tmp-<unix millis>-<8 hex chars>`, unique enough to key a card until the next load.
    pub fn temporary() -> Self {
        let random = Uuid::new_v4().simple().to_string();
        Self(format!(
            "{}{}-{}",
            TEMP_KEY_PREFIX,
            Utc::now().timestamp_millis(),
            &random[..8]
        ))
    }

    pub fn is_temporary(&self) -> bool {
        self.0.starts_with(TEMP_KEY_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CardPriority {
    Low,
    Medium,
    High,
}

/// Story-point estimate restricted to 1, 2, 3, 5, 8, 13 or 21.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct StoryPoints(u8);

impl StoryPoints {
    pub const ALLOWED: [u8; 7] = [1, 2, 3, 5, 8, 13, 21];

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for StoryPoints {
    type Error = SyncError;

    fn try_from(value: u8) -> SyncResult<Self> {
        if Self::ALLOWED.contains(&value) {
            Ok(Self(value))
        } else {
            Err(SyncError::Validation(format!(
                "story point {} is not one of {:?}",
                value,
                Self::ALLOWED
            )))
        }
    }
}

impl From<StoryPoints> for u8 {
    fn from(points: StoryPoints) -> Self {
        points.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Id assigned by the server on creation.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub server_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Locally synthesized key for a card the server returned without an id.
    #[serde(rename = "tmp_id", default, skip_serializing_if = "Option::is_none")]
    pub temp_id: Option<String>,
    /// Human-facing number such as `TASK-12`; not an identity.
    #[serde(
        rename = "card_id",
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub card_number: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "normalized_assignee",
        skip_serializing_if = "Option::is_none"
    )]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_point: Option<StoryPoints>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<CardPriority>,
    /// Title of the column the card was last placed in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
}

impl Card {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            server_id: None,
            id: None,
            temp_id: None,
            card_number: None,
            title: title.into(),
            description: None,
            assignee: None,
            story_point: None,
            priority: None,
            column: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = normalize_assignee(Some(assignee.into()));
        self
    }

    /// Identity key: server id, then generic id, then temporary id, then
    /// card number, then title.
    pub fn key(&self) -> CardKey {
        [
            &self.server_id,
            &self.id,
            &self.temp_id,
            &self.card_number,
        ]
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .map(|value| CardKey::new(value.as_str()))
        .unwrap_or_else(|| CardKey::new(self.title.as_str()))
    }

    pub fn has_key(&self, key: &CardKey) -> bool {
        self.key() == *key
    }

    pub fn has_identity(&self) -> bool {
        [&self.server_id, &self.id, &self.temp_id]
            .into_iter()
            .flatten()
            .any(|value| !value.is_empty())
    }

    /// Gives a card that came back without any id a temporary one.
    pub fn ensure_identity(&mut self) {
        if !self.has_identity() {
            self.temp_id = Some(CardKey::temporary().0);
        }
    }

    pub fn move_to_column(&mut self, column_title: &str) {
        self.column = Some(column_title.to_string());
    }

    pub fn is_unassigned(&self) -> bool {
        self.assignee.is_none()
    }
}

pub(crate) fn normalize_assignee(assignee: Option<String>) -> Option<String> {
    assignee
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty() && !name.eq_ignore_ascii_case(UNASSIGNED_ASSIGNEE))
}

fn normalized_assignee<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(normalize_assignee(Option::<String>::deserialize(deserializer)?))
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number for card_id, got {}",
            other
        ))),
    }
}
