use serde::{Serialize, Serializer};

/// Three-state change for an optional field in a partial update.
///
/// - `NoChange`: field keeps its existing value and is left out of the wire payload
/// - `Set(value)`: field is updated to the provided value
/// - `Clear`: field is cleared (set to None, sent as `null`)
///
/// # Example
///
/// ```
/// use kanban_domain::FieldUpdate;
///
/// let mut field = Some("old value".to_string());
/// FieldUpdate::Set("new value".to_string()).apply_to(&mut field);
/// assert_eq!(field, Some("new value".to_string()));
///
/// FieldUpdate::<String>::Clear.apply_to(&mut field);
/// assert_eq!(field, None);
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
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    /// `Some(value)` becomes `Set(value)`, `None` becomes `Clear`.
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(value) => FieldUpdate::Set(value),
            None => FieldUpdate::Clear,
        }
    }
}

// Pair with `skip_serializing_if = "FieldUpdate::is_no_change"`.
impl<T: Serialize> Serialize for FieldUpdate<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldUpdate::Set(value) => value.serialize(serializer),
            FieldUpdate::NoChange | FieldUpdate::Clear => serializer.serialize_none(),
        }
    }
}
