use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::card::{Card, CardKey};
use crate::column::Column;

pub type BoardId = String;

/// Board document as exchanged with the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    #[serde(alias = "_id")]
    pub id: BoardId,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub board_name: Option<String>,
    /// Label of the active iteration.
    #[serde(default, rename = "sprint", skip_serializing_if = "Option::is_none")]
    pub iteration: Option<String>,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Board {
    pub fn new(id: impl Into<BoardId>) -> Self {
        Self {
            id: id.into(),
            team: None,
            board_name: None,
            iteration: None,
            columns: Vec::new(),
        }
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    pub fn column(&self, title: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.title == title)
    }

    pub fn column_titles(&self) -> Vec<&str> {
        self.columns.iter().map(|column| column.title.as_str()).collect()
    }

    /// Column title of the first column holding `key`.
    pub fn locate(&self, key: &CardKey) -> Option<&str> {
        locate_in(&self.columns, key)
    }

    pub fn card(&self, key: &CardKey) -> Option<&Card> {
        self.columns.iter().find_map(|column| column.card(key))
    }

    pub fn card_count(&self) -> usize {
        count_cards(&self.columns)
    }

    /// Titles that appear on more than one column.
    pub fn duplicate_column_titles(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for column in &self.columns {
            if !seen.insert(column.title.as_str()) && !duplicates.contains(&column.title) {
                duplicates.push(column.title.clone());
            }
        }
        duplicates
    }
}

pub fn locate_in<'a>(columns: &'a [Column], key: &CardKey) -> Option<&'a str> {
    columns
        .iter()
        .find(|column| column.position_of(key).is_some())
        .map(|column| column.title.as_str())
}

pub fn count_cards(columns: &[Column]) -> usize {
    columns.iter().map(|column| column.cards.len()).sum()
}
