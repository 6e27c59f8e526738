//! Query builder for filter-dependent SQL: identifiers are constants, values are parameters.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
