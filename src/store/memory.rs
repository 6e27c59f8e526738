use super::Store;
use crate::error::AppError;
use crate::migration::SEED_ITEMS;
use crate::model::{Item, ItemTitle, NewPoint, Point, PointFilter};
use async_trait::async_trait;
use std::sync::RwLock;

#[derive(Default)]
struct Tables {
    items: Vec<Item>,
    points: Vec<Point>,
    /// (point_id, item_id)
    point_items: Vec<(i64, i64)>,
}

/// Process-local store with the same semantics as `PgStore`. Ids are assigned
/// sequentially from 1.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the standard item categories.
    pub fn seeded() -> Self {
        let store = Self::new();
        store.insert_items(SEED_ITEMS.iter().copied());
        store
    }

    /// Append items with the next free ids.
    pub fn insert_items<'a>(&self, items: impl IntoIterator<Item = (&'a str, &'a str)>) {
        let mut t = self.tables.write().unwrap_or_else(|e| e.into_inner());
        for (title, image) in items {
            let id = t.items.len() as i64 + 1;
            t.items.push(Item {
                id,
                title: title.to_string(),
                image: image.to_string(),
            });
        }
    }
}

fn lock_err() -> AppError {
    AppError::Internal("store lock poisoned".into())
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        self.tables.read().map(|_| ()).map_err(|_| lock_err())
    }

    async fn list_items(&self) -> Result<Vec<Item>, AppError> {
        let t = self.tables.read().map_err(|_| lock_err())?;
        Ok(t.items.clone())
    }

    async fn list_points(&self, filter: &PointFilter) -> Result<Vec<Point>, AppError> {
        let t = self.tables.read().map_err(|_| lock_err())?;
        let matches_text = |want: &Option<String>, have: &str| match want.as_deref() {
            Some(w) if !w.is_empty() => w == have,
            _ => true,
        };
        let points = t
            .points
            .iter()
            .filter(|p| matches_text(&filter.city, &p.city) && matches_text(&filter.uf, &p.uf))
            .filter(|p| {
                filter.items.is_empty()
                    || t.point_items
                        .iter()
                        .any(|(pid, iid)| *pid == p.id && filter.items.contains(iid))
            })
            .cloned()
            .collect();
        Ok(points)
    }

    async fn find_point(&self, id: i64) -> Result<Option<(Point, Vec<ItemTitle>)>, AppError> {
        let t = self.tables.read().map_err(|_| lock_err())?;
        let Some(point) = t.points.iter().find(|p| p.id == id).cloned() else {
            return Ok(None);
        };
        let titles = t
            .items
            .iter()
            .filter(|item| t.point_items.iter().any(|(pid, iid)| *pid == id && *iid == item.id))
            .map(|item| ItemTitle {
                title: item.title.clone(),
            })
            .collect();
        Ok(Some((point, titles)))
    }

    async fn create_point(&self, new: &NewPoint) -> Result<Point, AppError> {
        let mut t = self.tables.write().map_err(|_| lock_err())?;
        if let Some(unknown) = new.items.iter().find(|id| !t.items.iter().any(|i| i.id == **id)) {
            return Err(AppError::Validation(format!(
                "items references an unknown item ({})",
                unknown
            )));
        }
        let point = Point {
            id: t.points.last().map(|p| p.id + 1).unwrap_or(1),
            image: new.image.clone(),
            name: new.name.clone(),
            email: new.email.clone(),
            whatsapp: new.whatsapp.clone(),
            latitude: new.latitude,
            longitude: new.longitude,
            city: new.city.clone(),
            uf: new.uf.clone(),
        };
        for item_id in &new.items {
            if !t.point_items.contains(&(point.id, *item_id)) {
                t.point_items.push((point.id, *item_id));
            }
        }
        t.points.push(point.clone());
        Ok(point)
    }
}
