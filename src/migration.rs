//! Schema DDL and reference data. Both steps are idempotent and run at startup.

use crate::error::AppError;
use sqlx::PgPool;

/// Standard waste categories as (title, image file under the uploads directory).
pub const SEED_ITEMS: &[(&str, &str)] = &[
    ("Lâmpadas", "lampadas.svg"),
    ("Pilhas e Baterias", "baterias.svg"),
    ("Papéis e Papelão", "papeis-papelao.svg"),
    ("Resíduos Eletrônicos", "eletronicos.svg"),
    ("Resíduos Orgânicos", "organicos.svg"),
    ("Óleo de Cozinha", "oleo.svg"),
];

/// Tables in dependency order: point_items references both others.
const DDL: &[(&str, &str)] = &[
    (
        "points",
        r#"
        CREATE TABLE IF NOT EXISTS points (
            id BIGSERIAL PRIMARY KEY,
            image TEXT NOT NULL,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            whatsapp TEXT NOT NULL,
            latitude DOUBLE PRECISION NOT NULL,
            longitude DOUBLE PRECISION NOT NULL,
            city TEXT NOT NULL,
            uf VARCHAR(2) NOT NULL
        )
        "#,
    ),
    (
        "items",
        r#"
        CREATE TABLE IF NOT EXISTS items (
            id BIGSERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            image TEXT NOT NULL
        )
        "#,
    ),
    (
        "point_items",
        r#"
        CREATE TABLE IF NOT EXISTS point_items (
            point_id BIGINT NOT NULL REFERENCES points (id),
            item_id BIGINT NOT NULL REFERENCES items (id),
            PRIMARY KEY (point_id, item_id)
        )
        "#,
    ),
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS points_uf_city_idx ON points (uf, city)",
    "CREATE INDEX IF NOT EXISTS point_items_item_idx ON point_items (item_id)",
];

/// Create tables and indexes if missing.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    for (table, ddl) in DDL {
        sqlx::query(ddl).execute(pool).await?;
        tracing::debug!(table, "table ready");
    }
    for sql in INDEXES {
        sqlx::query(sql).execute(pool).await?;
    }
    tracing::info!("migrations applied");
    Ok(())
}

/// Insert [`SEED_ITEMS`] when the items table is empty. Returns the number of rows inserted.
pub async fn seed_items(pool: &PgPool) -> Result<u64, AppError> {
    let mut tx = pool.begin().await?;
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        return Ok(0);
    }
    let mut inserted = 0;
    for (title, image) in SEED_ITEMS {
        let result = sqlx::query("INSERT INTO items (title, image) VALUES ($1, $2)")
            .bind(title)
            .bind(image)
            .execute(&mut *tx)
            .await?;
        inserted += result.rows_affected();
    }
    tx.commit().await?;
    tracing::info!(inserted, "seeded items");
    Ok(inserted)
}
