//! View state of the web and mobile screens as immutable records.
//!
//! Each transition consumes the record and returns the next one, so a screen
//! is a fold over user events. `"0"` is the placeholder option of every
//! UF/city select and means "nothing selected".

pub mod create_point;
pub mod detail;
pub mod home;
pub mod points;

pub use create_point::{CreatePointForm, InputField};
pub use detail::{MailDraft, PointDetailView};
pub use home::LocationPicker;
pub use points::PointsQuery;

/// Value of the placeholder option in UF and city selects.
pub const UNSELECTED: &str = "0";

/// Map a select's raw value to a selection; the placeholder and blanks are `None`.
pub fn selection(value: &str) -> Option<String> {
    let v = value.trim();
    if v.is_empty() || v == UNSELECTED {
        None
    } else {
        Some(v.to_string())
    }
}

/// Add `id` when absent, remove it when present. Order of the rest is kept.
pub fn toggle_id(ids: &mut Vec<i64>, id: i64) {
    if let Some(pos) = ids.iter().position(|i| *i == id) {
        ids.remove(pos);
    } else {
        ids.push(id);
    }
}

/// Add `id` when absent; a repeat is a no-op.
pub fn select_id(ids: &mut Vec<i64>, id: i64) {
    if !ids.contains(&id) {
        ids.push(id);
    }
}
