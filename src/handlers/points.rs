//! Point handlers: create (multipart), show with item titles, filtered list.

use crate::error::AppError;
use crate::model::{parse_item_ids, PointDetail, PointFilter, PointView};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{
    extract::{multipart::MultipartError, Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::collections::HashMap;

/// Multipart field carrying the point's picture.
const IMAGE_FIELD: &str = "image";

struct ImagePart {
    file_name: String,
    bytes: Vec<u8>,
}

/// Body-limit overruns surface while streaming fields; keep them a 413.
fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::BadRequest(e.body_text())
    }
}

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest("invalid id".into()))
}

#[derive(Debug, Default, Deserialize)]
pub struct ListPointsParams {
    pub city: Option<String>,
    pub uf: Option<String>,
    /// Comma-separated item ids.
    pub items: Option<String>,
}

impl ListPointsParams {
    fn into_filter(self) -> Result<PointFilter, AppError> {
        let items = match self.items.as_deref() {
            Some(raw) => parse_item_ids(raw).map_err(AppError::BadRequest)?,
            None => Vec::new(),
        };
        Ok(PointFilter {
            city: self.city.map(|s| s.trim().to_string()),
            uf: self.uf.map(|s| s.trim().to_uppercase()),
            items,
        })
    }
}

/// GET /points?city=&uf=&items=1,2
pub async fn list_points(
    State(state): State<AppState>,
    Query(params): Query<ListPointsParams>,
) -> Result<Json<Vec<PointView>>, AppError> {
    let filter = params.into_filter()?;
    let points = state.store.list_points(&filter).await?;
    Ok(Json(
        points.into_iter().map(|p| p.into_view(&state.public_url)).collect(),
    ))
}

/// GET /points/:point_id — the point and the titles of the items it accepts.
pub async fn show_point(
    State(state): State<AppState>,
    Path(point_id): Path<String>,
) -> Result<Json<PointDetail>, AppError> {
    let id = parse_id(&point_id)?;
    let (point, items) = state
        .store
        .find_point(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("point {}", id)))?;
    Ok(Json(PointDetail {
        point: point.into_view(&state.public_url),
        items,
    }))
}

/// POST /points — multipart form with the point's fields, `items` as a
/// comma-separated id list, and an optional `image` file.
pub async fn create_point(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<PointView>), AppError> {
    let mut fields: HashMap<String, String> = HashMap::new();
    let mut image: Option<ImagePart> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == IMAGE_FIELD && field.file_name().is_some() {
            let file_name = field.file_name().unwrap_or("").to_string();
            let bytes = field.bytes().await.map_err(multipart_error)?;
            if !bytes.is_empty() {
                image = Some(ImagePart {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
        } else {
            let text = field.text().await.map_err(multipart_error)?;
            fields.insert(name, text);
        }
    }

    let mut new_point = RequestValidator::new_point(&fields, String::new())?;
    if let Some(part) = &image {
        new_point.image = state.uploads.save(&part.file_name, &part.bytes).await?;
    }

    let point = match state.store.create_point(&new_point).await {
        Ok(point) => point,
        Err(e) => {
            if !new_point.image.is_empty() {
                let path = state.uploads.root().join(&new_point.image);
                if let Err(io) = tokio::fs::remove_file(&path).await {
                    tracing::warn!(file = %path.display(), error = %io, "could not remove orphaned upload");
                }
            }
            return Err(e);
        }
    };
    tracing::info!(point_id = point.id, city = %point.city, uf = %point.uf, items = ?new_point.items, "point created");
    Ok((StatusCode::CREATED, Json(point.into_view(&state.public_url))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_params_parse_item_ids_and_normalize_uf() {
        let params = ListPointsParams {
            city: Some(" Recife ".into()),
            uf: Some("pe".into()),
            items: Some("2,1,2".into()),
        };
        let filter = params.into_filter().unwrap();
        assert_eq!(filter.city.as_deref(), Some("Recife"));
        assert_eq!(filter.uf.as_deref(), Some("PE"));
        assert_eq!(filter.items, vec![2, 1]);
    }

    #[test]
    fn list_params_reject_bad_item_ids() {
        let params = ListPointsParams {
            items: Some("one".into()),
            ..Default::default()
        };
        assert!(matches!(params.into_filter(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn parse_id_rejects_non_integers() {
        assert_eq!(parse_id("12").unwrap(), 12);
        assert!(matches!(parse_id("abc"), Err(AppError::BadRequest(_))));
    }
}
