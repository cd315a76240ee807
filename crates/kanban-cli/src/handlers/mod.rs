use kanban_domain::FieldUpdate;

pub mod card;
pub mod column;
pub mod dashboard;
pub mod store;

/// Map a `--field` / `--clear-field` flag pair onto a partial update.
/// An absent flag leaves the field unchanged.
pub(crate) fn field_update<T>(value: Option<T>, clear: bool) -> FieldUpdate<T> {
    match (value, clear) {
        (_, true) => FieldUpdate::Clear,
        (Some(value), false) => FieldUpdate::Set(value),
        (None, false) => FieldUpdate::NoChange,
    }
}
