pub mod board;
pub mod card;
pub mod column;
pub mod commands;
pub mod draft;
pub mod editable;
pub mod field_update;
pub mod filter;

pub use board::{Board, BoardId};
pub use card::{Card, CardKey, CardPriority, StoryPoints};
pub use column::Column;
pub use draft::{CardDraft, CardPatch};
pub use editable::CardFields;
pub use field_update::FieldUpdate;
pub use filter::{AssigneeSummary, CardFilter, FilterSelection, FilterToken, UNASSIGNED_TOKEN};
