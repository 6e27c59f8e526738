//! Mobile Points screen: points of the chosen UF/city, narrowed by the items
//! toggled in the header strip.

use super::{select_id, toggle_id};
use crate::client::{ApiClient, ClientError};
use crate::model::{PointFilter, PointView};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointsQuery {
    uf: String,
    city: String,
    items: Vec<i64>,
}

impl PointsQuery {
    /// Start from the `(uf, city)` the Home screen hands over.
    pub fn new(uf: impl Into<String>, city: impl Into<String>) -> Self {
        PointsQuery {
            uf: uf.into(),
            city: city.into(),
            items: Vec::new(),
        }
    }

    #[must_use]
    pub fn toggle_item(mut self, id: i64) -> Self {
        toggle_id(&mut self.items, id);
        self
    }

    /// Preselect `ids`; repeats select once.
    #[must_use]
    pub fn with_items(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        for id in ids {
            select_id(&mut self.items, id);
        }
        self
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.items.contains(&id)
    }

    pub fn filter(&self) -> PointFilter {
        PointFilter {
            city: Some(self.city.clone()),
            uf: Some(self.uf.clone()),
            items: self.items.clone(),
        }
    }

    pub async fn fetch(&self, api: &ApiClient) -> Result<Vec<PointView>, ClientError> {
        api.points(&self.filter()).await
    }
}
