//! Aggregate statistics endpoint.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /stats/{user_id} -- aggregate completion statistics for one user.
///
/// Unknown users report zero completions rather than an error.
pub async fn get_stats(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let stats = state.tracker.stats(&user_id)?;

    Ok(Json(DataResponse::new(stats)))
}
