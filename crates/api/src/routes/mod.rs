pub mod health;
pub mod progress;
pub mod stats;
pub mod tutorials;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /tutorials                 tutorial catalog (GET)
/// /progress/{user_id}        stored progress map (GET)
/// /progress                  upsert one completion record (POST)
/// /training/complete         pass the training-complete gate (POST)
/// /stats/{user_id}           aggregate statistics (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/tutorials", get(tutorials::list_tutorials))
        .route("/progress/{user_id}", get(progress::get_progress))
        .route("/progress", post(progress::save_progress))
        .route("/training/complete", post(progress::complete_training))
        .route("/stats/{user_id}", get(stats::get_stats))
}
