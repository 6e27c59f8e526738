//! Typed values bound to dynamically built PostgreSQL queries.

use sqlx::encode::{Encode, IsNull};
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::{Database, Type};

/// A value that can be bound to a query built at runtime. Each variant
/// reports its own PostgreSQL type so no casts are needed in the SQL.
#[derive(Clone, Debug, PartialEq)]
pub enum PgBindValue {
    Text(String),
    BigIntArray(Vec<i64>),
}

impl From<&str> for PgBindValue {
    fn from(s: &str) -> Self {
        PgBindValue::Text(s.to_string())
    }
}

impl From<&[i64]> for PgBindValue {
    fn from(ids: &[i64]) -> Self {
        PgBindValue::BigIntArray(ids.to_vec())
    }
}

impl<'q> Encode<'q, Postgres> for PgBindValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        match self {
            PgBindValue::Text(s) => <&str as Encode<Postgres>>::encode_by_ref(&s.as_str(), buf),
            PgBindValue::BigIntArray(v) => <Vec<i64> as Encode<Postgres>>::encode_by_ref(v, buf),
        }
    }

    fn produces(&self) -> Option<PgTypeInfo> {
        Some(match self {
            PgBindValue::Text(_) => <String as Type<Postgres>>::type_info(),
            PgBindValue::BigIntArray(_) => <Vec<i64> as Type<Postgres>>::type_info(),
        })
    }
}

impl Type<Postgres> for PgBindValue {
    fn type_info() -> PgTypeInfo {
        PgTypeInfo::with_name("TEXT")
    }
}
