//! Persistence behind the handlers: a `Store` trait with a PostgreSQL and an
//! in-process implementation.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::error::AppError;
use crate::model::{Item, ItemTitle, NewPoint, Point, PointFilter};
use async_trait::async_trait;

#[async_trait]
pub trait Store: Send + Sync {
    /// Cheap round-trip used by the readiness probe.
    async fn ping(&self) -> Result<(), AppError>;

    async fn list_items(&self) -> Result<Vec<Item>, AppError>;

    /// Distinct points matching `filter`, ordered by id.
    async fn list_points(&self, filter: &PointFilter) -> Result<Vec<Point>, AppError>;

    /// The point and the titles of the items it accepts, ordered by item id.
    async fn find_point(&self, id: i64) -> Result<Option<(Point, Vec<ItemTitle>)>, AppError>;

    /// Insert the point and its item links atomically. Unknown item ids are a
    /// validation error and leave nothing behind.
    async fn create_point(&self, new: &NewPoint) -> Result<Point, AppError>;
}
