//! Builds the parameterized SELECTs whose shape depends on request filters.

use super::params::PgBindValue;
use crate::model::PointFilter;

pub const POINT_COLUMNS: &[&str] = &[
    "id", "image", "name", "email", "whatsapp", "latitude", "longitude", "city", "uf",
];

/// Quote identifier for PostgreSQL (identifiers are compile-time constants here).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn point_column_list(alias: &str) -> String {
    POINT_COLUMNS
        .iter()
        .map(|c| format!("{}.{}", alias, quoted(c)))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<PgBindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: PgBindValue) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v);
        n
    }
}

/// SELECT DISTINCT points matching every filter that is set, ORDER BY id.
/// The item filter joins point_items and keeps points linked to any listed item.
pub fn select_points(filter: &PointFilter) -> QueryBuf {
    const ALIAS: &str = "p";
    let mut q = QueryBuf::new();
    let mut join = String::new();
    let mut where_parts = Vec::new();

    if !filter.items.is_empty() {
        join = format!(
            " JOIN {} pi ON pi.{} = {}.{}",
            quoted("point_items"),
            quoted("point_id"),
            ALIAS,
            quoted("id")
        );
        let n = q.push_param(PgBindValue::from(filter.items.as_slice()));
        where_parts.push(format!("pi.{} = ANY(${})", quoted("item_id"), n));
    }
    for (col, val) in [("city", &filter.city), ("uf", &filter.uf)] {
        if let Some(v) = val.as_deref().filter(|v| !v.is_empty()) {
            let n = q.push_param(PgBindValue::from(v));
            where_parts.push(format!("{}.{} = ${}", ALIAS, quoted(col), n));
        }
    }

    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    q.sql = format!(
        "SELECT DISTINCT {} FROM {} {}{}{} ORDER BY {}.{}",
        point_column_list(ALIAS),
        quoted("points"),
        ALIAS,
        join,
        where_clause,
        ALIAS,
        quoted("id")
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfiltered_select_has_no_join_or_params() {
        let q = select_points(&PointFilter::default());
        assert!(!q.sql.contains("JOIN"));
        assert!(!q.sql.contains("WHERE"));
        assert!(q.sql.ends_with(r#"ORDER BY p."id""#));
        assert!(q.params.is_empty());
    }

    #[test]
    fn item_filter_joins_point_items_and_binds_first() {
        let filter = PointFilter {
            city: Some("Recife".into()),
            uf: Some("PE".into()),
            items: vec![1, 2],
        };
        let q = select_points(&filter);
        assert!(q.sql.contains(r#"JOIN "point_items" pi ON pi."point_id" = p."id""#));
        assert!(q.sql.contains(r#"WHERE pi."item_id" = ANY($1) AND p."city" = $2 AND p."uf" = $3"#));
        assert_eq!(
            q.params,
            vec![
                PgBindValue::BigIntArray(vec![1, 2]),
                PgBindValue::Text("Recife".into()),
                PgBindValue::Text("PE".into()),
            ]
        );
    }

    #[test]
    fn blank_text_filters_are_ignored() {
        let filter = PointFilter {
            city: Some(String::new()),
            uf: Some("SP".into()),
            items: vec![],
        };
        let q = select_points(&filter);
        assert!(q.sql.contains(r#"WHERE p."uf" = $1"#));
        assert_eq!(q.params.len(), 1);
    }

    #[test]
    fn selects_distinct_point_columns() {
        let q = select_points(&PointFilter::default());
        assert!(q.sql.starts_with(r#"SELECT DISTINCT p."id", p."image", p."name""#));
    }
}
