use super::{Command, CommandContext};
use crate::{Card, CardFields, CardKey};
use boardsync_core::{Editable, SyncError, SyncResult};

fn card_not_found(key: &CardKey) -> SyncError {
    SyncError::NotFound(format!("card '{}'", key))
}

/// Append a card to the end of a column
pub struct AppendCard {
    pub column_title: String,
    pub card: Card,
}

impl Command for AppendCard {
    fn execute(&self, context: &mut CommandContext) -> SyncResult<()> {
        let key = self.card.key();
        context.column_mut(&self.column_title)?;
        for column in context.columns.iter_mut() {
            column.take_card(&key);
        }
        context.column_mut(&self.column_title)?.push_card(self.card.clone());
        Ok(())
    }

    fn description(&self) -> String {
        format!("Append card '{}' to '{}'", self.card.title, self.column_title)
    }
}

/// Overwrite the editable fields of a card in place
pub struct ReplaceCardFields {
    pub key: CardKey,
    pub fields: CardFields,
}

impl Command for ReplaceCardFields {
    fn execute(&self, context: &mut CommandContext) -> SyncResult<()> {
        let card = context
            .columns
            .iter_mut()
            .find_map(|column| column.card_mut(&self.key))
            .ok_or_else(|| card_not_found(&self.key))?;
        self.fields.clone().apply_to(card);
        Ok(())
    }

    fn description(&self) -> String {
        format!("Update card {}", self.key)
    }
}

/// Remove a card from a column
pub struct RemoveCard {
    pub column_title: String,
    pub key: CardKey,
}

impl Command for RemoveCard {
    fn execute(&self, context: &mut CommandContext) -> SyncResult<()> {
        context
            .column_mut(&self.column_title)?
            .take_card(&self.key)
            .map(|_| ())
            .ok_or_else(|| card_not_found(&self.key))
    }

    fn description(&self) -> String {
        format!("Remove card {} from '{}'", self.key, self.column_title)
    }
}

/// Move a card to the end of another column
///
/// The card is stripped from every column first, so a stale source hint can
/// never leave a duplicate behind.
pub struct MoveCard {
    pub key: CardKey,
    pub destination: String,
}

impl Command for MoveCard {
    fn execute(&self, context: &mut CommandContext) -> SyncResult<()> {
        context.column_mut(&self.destination)?;

        let mut moved = None;
        for column in context.columns.iter_mut() {
            if let Some(card) = column.take_card(&self.key) {
                moved.get_or_insert(card);
            }
        }
        let card = moved.ok_or_else(|| card_not_found(&self.key))?;

        context.column_mut(&self.destination)?.push_card(card);
        Ok(())
    }

    fn description(&self) -> String {
        format!("Move card {} to '{}'", self.key, self.destination)
    }
}
