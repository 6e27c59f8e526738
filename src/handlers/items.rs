//! Items handler: the static waste categories.

use crate::error::AppError;
use crate::model::ItemView;
use crate::state::AppState;
use axum::{extract::State, Json};

/// GET /items — every item with its `image_url`.
pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<ItemView>>, AppError> {
    let items = state.store.list_items().await?;
    Ok(Json(
        items.into_iter().map(|i| i.into_view(&state.public_url)).collect(),
    ))
}
