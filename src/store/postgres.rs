use super::Store;
use crate::error::AppError;
use crate::model::{Item, ItemTitle, NewPoint, Point, PointFilter};
use crate::sql::select_points;
use async_trait::async_trait;
use sqlx::PgPool;

/// SQLSTATE for foreign_key_violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";

const SELECT_POINT_BY_ID: &str = "SELECT id, image, name, email, whatsapp, latitude, longitude, city, uf \
     FROM points WHERE id = $1";

const SELECT_POINT_ITEM_TITLES: &str = "SELECT items.title FROM items \
     JOIN point_items ON point_items.item_id = items.id \
     WHERE point_items.point_id = $1 ORDER BY items.id";

const INSERT_POINT: &str = "INSERT INTO points (image, name, email, whatsapp, latitude, longitude, city, uf) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
     RETURNING id, image, name, email, whatsapp, latitude, longitude, city, uf";

const INSERT_POINT_ITEMS: &str = "INSERT INTO point_items (point_id, item_id) \
     SELECT $1, item_id FROM UNNEST($2::bigint[]) AS item_id";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|d| d.code())
        .map(|code| code == FOREIGN_KEY_VIOLATION)
        .unwrap_or(false)
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn list_items(&self) -> Result<Vec<Item>, AppError> {
        let items = sqlx::query_as::<_, Item>("SELECT id, title, image FROM items ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn list_points(&self, filter: &PointFilter) -> Result<Vec<Point>, AppError> {
        let q = select_points(filter);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, Point>(&q.sql);
        for p in q.params {
            query = query.bind(p);
        }
        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn find_point(&self, id: i64) -> Result<Option<(Point, Vec<ItemTitle>)>, AppError> {
        tracing::debug!(sql = SELECT_POINT_BY_ID, id, "query");
        let Some(point) = sqlx::query_as::<_, Point>(SELECT_POINT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };
        let titles = sqlx::query_as::<_, ItemTitle>(SELECT_POINT_ITEM_TITLES)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;
        Ok(Some((point, titles)))
    }

    async fn create_point(&self, new: &NewPoint) -> Result<Point, AppError> {
        let mut tx = self.pool.begin().await?;
        tracing::debug!(sql = INSERT_POINT, name = %new.name, "query (tx)");
        let point = sqlx::query_as::<_, Point>(INSERT_POINT)
            .bind(&new.image)
            .bind(&new.name)
            .bind(&new.email)
            .bind(&new.whatsapp)
            .bind(new.latitude)
            .bind(new.longitude)
            .bind(&new.city)
            .bind(&new.uf)
            .fetch_one(&mut *tx)
            .await?;

        tracing::debug!(sql = INSERT_POINT_ITEMS, point_id = point.id, items = ?new.items, "query (tx)");
        let linked = sqlx::query(INSERT_POINT_ITEMS)
            .bind(point.id)
            .bind(&new.items)
            .execute(&mut *tx)
            .await;
        match linked {
            Ok(_) => {}
            Err(e) if is_foreign_key_violation(&e) => {
                tx.rollback().await?;
                return Err(AppError::Validation("items references an unknown item".into()));
            }
            Err(e) => return Err(e.into()),
        }

        tx.commit().await?;
        Ok(point)
    }
}
