//! Ecoleta: waste-collection point marketplace.
//!
//! The backend (`routes`, `handlers`, `store`) serves items and collection
//! points over HTTP from PostgreSQL. The client side (`client`, `ui`) holds
//! the API and IBGE clients and the view state of the web and mobile screens.

pub mod client;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod routes;
pub mod service;
pub mod settings;
pub mod sql;
pub mod state;
pub mod store;
pub mod ui;
pub mod upload;

pub use error::{AppError, ConfigError};
pub use migration::{apply_migrations, seed_items};
pub use routes::{api_routes, app, common_routes};
pub use settings::{Settings, StorageKind};
pub use state::AppState;
pub use store::{MemoryStore, PgStore, Store};
