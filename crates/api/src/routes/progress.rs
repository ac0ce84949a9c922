//! Progress read/write endpoints and the training-complete gate.
//!
//! User identity is the phone number string supplied by the client; it is
//! not validated, normalized, or deduplicated server-side.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use onboarding_core::types::{Timestamp, TutorialId};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /progress/{user_id}
// ---------------------------------------------------------------------------

/// Stored progress for one user; an empty map for unknown users.
pub async fn get_progress(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let progress = state.tracker.progress(&user_id)?;

    Ok(Json(DataResponse::new(progress)))
}

// ---------------------------------------------------------------------------
// POST /progress
// ---------------------------------------------------------------------------

/// Body for saving one completion record.
///
/// Required fields are `Option` so their absence surfaces as a 400 with
/// the standard envelope instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveProgressRequest {
    pub user_id: Option<String>,
    pub tutorial_id: Option<TutorialId>,
    pub completed: Option<bool>,
    pub completed_at: Option<Timestamp>,
}

/// Upsert the completion record for one tutorial and return the full
/// updated map.
pub async fn save_progress(
    State(state): State<AppState>,
    Json(input): Json<SaveProgressRequest>,
) -> AppResult<impl IntoResponse> {
    let (Some(user_id), Some(tutorial_id)) = (input.user_id, input.tutorial_id) else {
        return Err(AppError::BadRequest(
            "userId and tutorialId are required".to_owned(),
        ));
    };

    let progress = state.tracker.record_completion(
        &user_id,
        tutorial_id,
        input.completed,
        input.completed_at,
    )?;

    tracing::info!(%user_id, tutorial_id, "Progress saved");

    Ok(Json(DataResponse::with_message(
        progress,
        "Progress saved successfully",
    )))
}

// ---------------------------------------------------------------------------
// POST /training/complete
// ---------------------------------------------------------------------------

/// Body for passing the training-complete gate.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteTrainingRequest {
    pub user_id: Option<String>,
    pub completed_at: Option<Timestamp>,
}

/// Mark the whole training as complete once every tutorial is done.
pub async fn complete_training(
    State(state): State<AppState>,
    Json(input): Json<CompleteTrainingRequest>,
) -> AppResult<impl IntoResponse> {
    let Some(user_id) = input.user_id else {
        return Err(AppError::BadRequest("userId is required".to_owned()));
    };

    let progress = state
        .tracker
        .mark_training_complete(&user_id, input.completed_at)?;

    tracing::info!(%user_id, "Training marked as complete");

    Ok(Json(DataResponse::with_message(
        progress,
        "Training marked as complete",
    )))
}
