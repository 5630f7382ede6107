//! The user's assignee filter selection.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::card_filter::CardFilter;
use crate::Card;

/// Selection value that stands for "cards without an assignee".
pub const UNASSIGNED_TOKEN: &str = "unassigned";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FilterToken {
    User(String),
    Unassigned,
}

impl FilterToken {
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            None
        } else if value.eq_ignore_ascii_case(UNASSIGNED_TOKEN) {
            Some(Self::Unassigned)
        } else {
            Some(Self::User(value.to_string()))
        }
    }
}

/// Selected assignees. An empty selection shows every card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    tokens: BTreeSet<FilterToken>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a selection from raw values; `"unassigned"` becomes the sentinel
    /// and blank values are dropped.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tokens: values
                .into_iter()
                .filter_map(|value| FilterToken::parse(value.as_ref()))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, token: &FilterToken) -> bool {
        self.tokens.contains(token)
    }

    pub fn includes_unassigned(&self) -> bool {
        self.tokens.contains(&FilterToken::Unassigned)
    }

    /// Adds the value if absent, removes it otherwise. Returns whether it is now selected.
    pub fn toggle(&mut self, value: &str) -> bool {
        let Some(token) = FilterToken::parse(value) else {
            return false;
        };
        if self.tokens.remove(&token) {
            false
        } else {
            self.tokens.insert(token);
            true
        }
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    pub fn tokens(&self) -> impl Iterator<Item = &FilterToken> {
        self.tokens.iter()
    }
}

impl CardFilter for FilterSelection {
    fn matches(&self, card: &Card) -> bool {
        if self.tokens.is_empty() {
            return true;
        }
        match &card.assignee {
            Some(name) => self.tokens.contains(&FilterToken::User(name.clone())),
            None => self.includes_unassigned(),
        }
    }
}
