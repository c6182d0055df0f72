//! Password verification for shared service links.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::db;
use crate::db::models::SharedService;
use crate::error::{msg, ApiError};
use crate::handlers::require_body;
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
pub struct VerifyShareRequest {
    pub token: Option<String>,
    pub password: Option<String>,
}

/// POST /share/verify - Body `{token, password}`. Missing, inactive,
/// and expired links all answer the same 404; only a reachable link
/// with a wrong password answers 401.
pub async fn share_verify(
    State(state): State<AppState>,
    body: Result<Json<VerifyShareRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = require_body(body, msg::BAD_REQUEST)?;
    let (token, password) = match (request.token, request.password) {
        (Some(token), Some(password)) if !token.is_empty() && !password.is_empty() => {
            (token, password)
        }
        _ => return Err(ApiError::bad_request(msg::BAD_REQUEST)),
    };

    let share = db::shares::find_by_token(&state.db, &token)
        .await?
        .ok_or_else(link_not_found)?;

    if !is_available(&share, Utc::now()) {
        return Err(link_not_found());
    }

    let matches = bcrypt::verify(&password, &share.password_hash).map_err(|err| {
        tracing::error!("share password verification failed: {err}");
        ApiError::internal()
    })?;
    if !matches {
        return Err(ApiError::unauthorized(msg::SHARE_PASSWORD_MISMATCH));
    }

    Ok(Json(json!({ "success": true, "message": msg::SHARE_VERIFIED })))
}

fn link_not_found() -> ApiError {
    ApiError::not_found(msg::SHARE_NOT_FOUND)
}

/// Active flag first, then the optional expiry date.
fn is_available(share: &SharedService, now: DateTime<Utc>) -> bool {
    if !share.is_active {
        return false;
    }
    match share.expires_at {
        Some(expires_at) => now <= expires_at,
        None => true,
    }
}
