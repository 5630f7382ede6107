use boardsync_domain::CardKey;

use crate::state::ViewKey;

/// Change notifications published by a [`crate::BoardStateController`].
///
/// Views subscribe explicitly instead of registering callbacks on shared
/// global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// A new snapshot replaced local state; components keyed on the old
    /// view key must be rebuilt.
    Loaded { view: ViewKey },
    CardAdded { column: String, key: CardKey },
    CardEdited { key: CardKey },
    CardDeleted { column: String, key: CardKey },
    CardMoved {
        key: CardKey,
        from: String,
        to: String,
    },
    /// The server did not accept the layout after a move. Local state keeps
    /// the move unless the controller is configured to re-fetch.
    MovePersistFailed { key: CardKey, message: String },
    FilterChanged,
}
