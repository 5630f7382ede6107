//! Card filter trait and column view derivation.

use crate::{Card, Column};

/// Trait for filtering cards by various criteria.
pub trait CardFilter {
    /// Returns true if the card matches the filter criteria.
    fn matches(&self, card: &Card) -> bool;
}

/// Copies `columns`, keeping only the cards `filter` matches.
///
/// Column order, card order and empty columns are preserved.
pub fn filter_columns(columns: &[Column], filter: &dyn CardFilter) -> Vec<Column> {
    columns
        .iter()
        .map(|column| Column {
            title: column.title.clone(),
            cards: column
                .cards
                .iter()
                .filter(|card| filter.matches(card))
                .cloned()
                .collect(),
        })
        .collect()
}
