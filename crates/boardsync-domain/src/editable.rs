use crate::card::{Card, CardPriority, StoryPoints};
use boardsync_core::Editable;
use serde::{Deserialize, Serialize};

/// The user-editable part of a card. Identity, card number and column
/// membership are not included and survive an edit untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardFields {
    pub title: String,
    pub description: Option<String>,
    pub story_point: Option<StoryPoints>,
    pub assignee: Option<String>,
    pub priority: Option<CardPriority>,
}

impl Editable<Card> for CardFields {
    fn from_entity(card: &Card) -> Self {
        Self {
            title: card.title.clone(),
            description: card.description.clone(),
            story_point: card.story_point,
            assignee: card.assignee.clone(),
            priority: card.priority,
        }
    }

    fn apply_to(self, card: &mut Card) {
        card.title = self.title;
        card.description = self.description;
        card.story_point = self.story_point;
        card.assignee = crate::card::normalize_assignee(self.assignee);
        card.priority = self.priority;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_keeps_identity() {
        let mut card = Card::new("Old").with_id("c1");
        card.card_number = Some("7".to_string());
        card.column = Some("Doing".to_string());

        let mut fields = CardFields::from_entity(&card);
        fields.title = "New".to_string();
        fields.assignee = Some("unassigned".to_string());
        fields.apply_to(&mut card);

        assert_eq!(card.title, "New");
        assert_eq!(card.assignee, None);
        assert_eq!(card.id.as_deref(), Some("c1"));
        assert_eq!(card.card_number.as_deref(), Some("7"));
        assert_eq!(card.column.as_deref(), Some("Doing"));
    }
}
