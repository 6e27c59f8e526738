//! Domain records and their wire shapes.
//!
//! Rows (`Item`, `Point`) mirror the tables. Views (`ItemView`, `PointView`)
//! are what the API returns: the row plus an `image_url` derived from the
//! public base URL. Clients deserialize the same view types.

use serde::{Deserialize, Serialize};

/// Waste category a collection point accepts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    pub id: i64,
    pub title: String,
    pub image: String,
}

/// Physical collection point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Point {
    pub id: i64,
    pub image: String,
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub uf: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemView {
    #[serde(flatten)]
    pub item: Item,
    pub image_url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointView {
    #[serde(flatten)]
    pub point: Point,
    pub image_url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ItemTitle {
    pub title: String,
}

/// Body of `GET /points/:point_id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointDetail {
    pub point: PointView,
    pub items: Vec<ItemTitle>,
}

/// A validated point submission, ready to insert together with its item links.
#[derive(Clone, Debug, PartialEq)]
pub struct NewPoint {
    pub image: String,
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub uf: String,
    /// Distinct item ids, in submission order.
    pub items: Vec<i64>,
}

/// Filters for `GET /points`. Empty fields do not filter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointFilter {
    pub city: Option<String>,
    pub uf: Option<String>,
    /// Match points accepting at least one of these items.
    pub items: Vec<i64>,
}

/// `<public_url>/uploads/<image>`
pub fn image_url(public_url: &str, image: &str) -> String {
    format!("{}/uploads/{}", public_url.trim_end_matches('/'), image)
}

impl Item {
    pub fn into_view(self, public_url: &str) -> ItemView {
        let image_url = image_url(public_url, &self.image);
        ItemView { item: self, image_url }
    }
}

impl Point {
    pub fn into_view(self, public_url: &str) -> PointView {
        let image_url = image_url(public_url, &self.image);
        PointView { point: self, image_url }
    }
}

/// Parse a comma-separated id list such as `"1, 2,6"`. Blank entries are
/// skipped and repeated ids keep their first position.
pub fn parse_item_ids(raw: &str) -> Result<Vec<i64>, String> {
    let mut ids = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let id: i64 = part.parse().map_err(|_| format!("invalid item id '{}'", part))?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

/// Inverse of [`parse_item_ids`].
pub fn join_item_ids(ids: &[i64]) -> String {
    ids.iter().map(i64::to_string).collect::<Vec<_>>().join(",")
}
