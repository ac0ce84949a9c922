//! Shared helpers for integration tests.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use onboarding_api::config::ServerConfig;
use onboarding_api::router::build_app_router;
use onboarding_api::state::AppState;
use onboarding_core::{Catalog, Tutorial, TutorialContent};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// A four-tutorial text catalog for driving the progress scenarios.
pub fn test_catalog() -> Catalog {
    let tutorials = (1..=4)
        .map(|id| Tutorial {
            id,
            title: format!("Tutorial {id}"),
            description: format!("Description {id}"),
            content: TutorialContent::Text(format!("Content {id}")),
            estimated_time: "2 minutes".to_string(),
            order: id as u32,
        })
        .collect();
    Catalog::new(tutorials).expect("test catalog is valid")
}

/// Build the full application router with all middleware layers.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses. Clones of the returned router
/// share one progress store, so multi-request scenarios see each other's
/// writes.
pub fn build_test_app(catalog: Catalog) -> Router {
    let config = test_config();
    let state = AppState::new(config.clone(), catalog);
    build_app_router(state, &config)
}

/// Send a GET request to the app.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Send a POST request with a JSON body to the app.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
