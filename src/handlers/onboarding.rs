//! Onboarding completion and demo data cleanup.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::db;
use crate::error::{msg, ApiError};
use crate::handlers::require_body;
use crate::middleware::AuthSession;
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteOnboardingRequest {
    pub completed: Option<bool>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// POST /onboarding/complete - Mark the caller onboarded
/// (session-authenticated) and hand demo-row deletion to a detached
/// task; cleanup failures are logged, never surfaced, and onboarding
/// still succeeds.
pub async fn onboarding_complete(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    body: Result<Json<CompleteOnboardingRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = require_body(body, msg::BAD_REQUEST)?;
    if request.completed != Some(true) {
        return Err(ApiError::bad_request(msg::BAD_REQUEST));
    }

    let updated =
        db::users::complete_onboarding(&state.db, session.user_id, request.completed_at).await?;
    if !updated {
        // Valid token for a user row that no longer exists
        return Err(ApiError::unauthorized(msg::LOGIN_REQUIRED));
    }

    info!(user_id = session.user_id, "onboarding completed");

    let pool = state.db.clone();
    let user_id = session.user_id;
    tokio::spawn(async move {
        db::users::purge_demo_data(&pool, user_id).await;
    });

    Ok(Json(json!({ "success": true })))
}
