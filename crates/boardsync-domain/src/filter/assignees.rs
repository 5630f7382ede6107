//! Assignee options offered by the filter UI.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::Column;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssigneeSummary {
    /// Distinct assignee usernames, sorted.
    pub usernames: Vec<String>,
    /// Whether the "unassigned" option should be offered.
    pub has_unassigned_cards: bool,
}

impl AssigneeSummary {
    pub fn from_columns(columns: &[Column]) -> Self {
        let mut usernames = BTreeSet::new();
        let mut has_unassigned_cards = false;

        for card in columns.iter().flat_map(|column| &column.cards) {
            match card.assignee.as_deref() {
                Some(name) if !name.is_empty() => {
                    usernames.insert(name.to_string());
                }
                _ => has_unassigned_cards = true,
            }
        }

        Self {
            usernames: usernames.into_iter().collect(),
            has_unassigned_cards,
        }
    }
}
