use axum::{routing::get, Json, Router};
use serde::Serialize;

use onboarding_core::types::Timestamp;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    pub success: bool,
    /// Human-readable liveness message.
    pub message: &'static str,
    pub timestamp: Timestamp,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
}

/// GET /health -- liveness probe.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        message: "Rider Onboarding API is running",
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Mount health check routes (served at root level and aliased under
/// `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
