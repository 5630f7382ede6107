use serde::{Serialize, Serializer};

/// Three-state update for an optional card field in an edit request.
///
/// - `NoChange`: the field keeps its current value and is left out of the request
/// - `Set(value)`: the field takes `value`
/// - `Clear`: the field is emptied (sent as `null`)
///
/// # Example
///
/// ```
/// use boardsync_domain::FieldUpdate;
///
/// let mut assignee = Some("alice".to_string());
/// FieldUpdate::Set("bob".to_string()).apply_to(&mut assignee);
/// assert_eq!(assignee.as_deref(), Some("bob"));
///
/// FieldUpdate::<String>::Clear.apply_to(&mut assignee);
/// assert_eq!(assignee, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    NoChange,
    Set(T),
    Clear,
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        FieldUpdate::NoChange
    }
}

impl<T> FieldUpdate<T> {
    pub fn apply_to(self, field: &mut Option<T>) {
        match self {
            FieldUpdate::NoChange => {}
            FieldUpdate::Set(value) => *field = Some(value),
            FieldUpdate::Clear => *field = None,
        }
    }

    pub fn is_change(&self) -> bool {
        !matches!(self, FieldUpdate::NoChange)
    }

    pub fn is_no_change(&self) -> bool {
        !self.is_change()
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            FieldUpdate::Set(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(value) => FieldUpdate::Set(value),
            None => FieldUpdate::Clear,
        }
    }
}

/// Serializes `Set` as the value and `Clear` as `null`. Pair with
/// `skip_serializing_if = "FieldUpdate::is_no_change"`.
impl<T: Serialize> Serialize for FieldUpdate<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldUpdate::Set(value) => serializer.serialize_some(value),
            FieldUpdate::NoChange | FieldUpdate::Clear => serializer.serialize_none(),
        }
    }
}
