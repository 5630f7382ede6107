use serde::{Deserialize, Serialize};

use crate::card::{Card, CardKey};

/// A board column. The title doubles as the column's identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub title: String,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Column {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            cards: Vec::new(),
        }
    }

    pub fn with_cards(mut self, cards: Vec<Card>) -> Self {
        self.cards = cards;
        self
    }

    pub fn position_of(&self, key: &CardKey) -> Option<usize> {
        self.cards.iter().position(|card| card.has_key(key))
    }

    pub fn card(&self, key: &CardKey) -> Option<&Card> {
        self.cards.iter().find(|card| card.has_key(key))
    }

    pub fn card_mut(&mut self, key: &CardKey) -> Option<&mut Card> {
        self.cards.iter_mut().find(|card| card.has_key(key))
    }

    pub fn push_card(&mut self, mut card: Card) {
        card.move_to_column(&self.title);
        self.cards.push(card);
    }

    /// Removes the first card with `key`. Other cards sharing the key, such as
    /// id-less cards with the same title, stay in place.
    pub fn take_card(&mut self, key: &CardKey) -> Option<Card> {
        let position = self.position_of(key)?;
        Some(self.cards.remove(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_card_tags_membership() {
        let mut column = Column::new("Done");
        column.push_card(Card::new("Task").with_id("c1"));
        assert_eq!(column.cards[0].column.as_deref(), Some("Done"));
    }

    #[test]
    fn test_take_card_removes_first_match_only() {
        let mut column = Column::new("To Do").with_cards(vec![
            Card::new("Bug"),
            Card::new("Task").with_id("c2"),
            Card::new("Bug"),
        ]);

        let taken = column.take_card(&CardKey::from("Bug")).unwrap();
        assert_eq!(taken.title, "Bug");
        assert_eq!(column.cards.len(), 2);
        assert_eq!(column.position_of(&CardKey::from("c2")), Some(0));
        assert_eq!(column.position_of(&CardKey::from("Bug")), Some(1));
        assert!(column.take_card(&CardKey::from("c9")).is_none());
    }
}
