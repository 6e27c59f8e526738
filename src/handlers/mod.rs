//! HTTP handlers: items listing and point registration/lookup.

pub mod items;
pub mod points;
pub use items::*;
pub use points::*;
