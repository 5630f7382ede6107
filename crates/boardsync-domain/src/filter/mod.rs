//! Assignee filtering.
//!
//! Filtering derives views over a board's columns without mutating the cards.

pub mod assignees;
pub mod card_filter;
pub mod selection;

pub use assignees::AssigneeSummary;
pub use card_filter::{filter_columns, CardFilter};
pub use selection::{FilterSelection, FilterToken, UNASSIGNED_TOKEN};
