//! Request validation ahead of the store.

mod validation;
pub use validation::{point_rules, RequestValidator, ValidationRule};
