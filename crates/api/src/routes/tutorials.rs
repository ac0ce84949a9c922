//! Tutorial catalog endpoint.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::response::DataResponse;
use crate::state::AppState;

/// GET /tutorials -- the full catalog in display order.
///
/// The catalog is immutable, so this returns the same data on every call.
pub async fn list_tutorials(State(state): State<AppState>) -> impl IntoResponse {
    Json(DataResponse::new(state.catalog.list().to_vec()))
}
