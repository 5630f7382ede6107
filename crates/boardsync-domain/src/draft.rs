use boardsync_core::{SyncError, SyncResult};
use serde::Serialize;

use crate::card::{normalize_assignee, Card, CardPriority, StoryPoints};
use crate::field_update::FieldUpdate;

fn require_title(title: &str) -> SyncResult<()> {
    if title.trim().is_empty() {
        return Err(SyncError::Validation("card title must not be empty".to_string()));
    }
    Ok(())
}

/// A card the user wants to create.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CardDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story_point: Option<StoryPoints>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<CardPriority>,
}

impl CardDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = normalize_assignee(Some(assignee.into()));
        self
    }

    pub fn with_priority(mut self, priority: CardPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_story_point(mut self, points: StoryPoints) -> Self {
        self.story_point = Some(points);
        self
    }

    pub fn validate(&self) -> SyncResult<()> {
        require_title(&self.title)
    }

    /// The card as it would look if the server echoed the draft back without an id.
    pub fn into_card(self) -> Card {
        let mut card = Card::new(self.title.trim());
        card.description = self.description;
        card.assignee = normalize_assignee(self.assignee);
        card.story_point = self.story_point;
        card.priority = self.priority;
        card
    }
}

/// Partial edit of a card's mutable fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CardPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "FieldUpdate::is_no_change")]
    pub description: FieldUpdate<String>,
    #[serde(skip_serializing_if = "FieldUpdate::is_no_change")]
    pub assignee: FieldUpdate<String>,
    #[serde(skip_serializing_if = "FieldUpdate::is_no_change")]
    pub story_point: FieldUpdate<StoryPoints>,
    #[serde(skip_serializing_if = "FieldUpdate::is_no_change")]
    pub priority: FieldUpdate<CardPriority>,
}

impl CardPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: FieldUpdate<String>) -> Self {
        self.description = description;
        self
    }

    pub fn assignee(mut self, assignee: FieldUpdate<String>) -> Self {
        self.assignee = assignee;
        self
    }

    pub fn story_point(mut self, points: FieldUpdate<StoryPoints>) -> Self {
        self.story_point = points;
        self
    }

    pub fn priority(mut self, priority: FieldUpdate<CardPriority>) -> Self {
        self.priority = priority;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && !self.description.is_change()
            && !self.assignee.is_change()
            && !self.story_point.is_change()
            && !self.priority.is_change()
    }

    pub fn validate(&self) -> SyncResult<()> {
        match &self.title {
            Some(title) => require_title(title),
            None => Ok(()),
        }
    }

    pub fn apply_to(self, card: &mut Card) {
        if let Some(title) = self.title {
            card.title = title.trim().to_string();
        }
        self.description.apply_to(&mut card.description);
        self.assignee.apply_to(&mut card.assignee);
        card.assignee = normalize_assignee(card.assignee.take());
        self.story_point.apply_to(&mut card.story_point);
        self.priority.apply_to(&mut card.priority);
    }
}
