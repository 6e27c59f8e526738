//! Resource routes: items, points, and the files their `image_url`s reference.

use crate::handlers::{create_point, list_items, list_points, show_point};
use crate::state::AppState;
use axum::{routing::get, Router};
use tower_http::services::ServeDir;

pub fn api_routes(state: AppState) -> Router {
    // Uploaded pictures first, then the bundled item icons.
    let uploads = ServeDir::new(state.uploads.root()).fallback(ServeDir::new(&state.assets_dir));
    Router::new()
        .route("/items", get(list_items))
        .route("/points", get(list_points).post(create_point))
        .route("/points/:point_id", get(show_point))
        .nest_service("/uploads", uploads)
        .with_state(state)
}
