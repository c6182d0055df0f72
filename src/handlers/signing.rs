//! OTP issuance for the client signing flow.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::config::config;
use crate::db;
use crate::error::{msg, ApiError};
use crate::handlers::require_body;
use crate::routes::AppState;
use crate::signing::{otp, precheck, SigningRejection};

#[derive(Debug, Deserialize)]
pub struct SendOtpRequest {
    pub token: Option<String>,
    pub email: Option<String>,
}

/// POST /contracts/send-otp - Body `{token, email}`. Runs the signing
/// preconditions in order, then issues a fresh 6-digit code valid for
/// five minutes. Outside production the code is echoed back as
/// `developmentOtp` so the flow can be exercised without a mailbox.
pub async fn send_otp(
    State(state): State<AppState>,
    body: Result<Json<SendOtpRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = require_body(body, msg::OTP_INPUT_REQUIRED)?;
    let (submitted_token, email) = match (request.token, request.email) {
        (Some(token), Some(email)) if !token.is_empty() && !email.is_empty() => (token, email),
        _ => return Err(ApiError::bad_request(msg::OTP_INPUT_REQUIRED)),
    };

    let token = precheck::run(&state.db, &submitted_token, &email).await?;

    let code = otp::generate_code();
    let expires_at = otp::expiry_from(Utc::now());

    let stored = db::sign_tokens::store_otp(&state.db, token.id, &code, expires_at).await?;
    if !stored {
        // Token was consumed between precheck and persist
        return Err(SigningRejection::TokenUsed.into());
    }

    info!(token_id = token.id, contract_id = token.contract_id, "issued signing otp");

    let mut response = json!({
        "success": true,
        "message": msg::OTP_SENT,
    });
    if !config().environment.is_production() {
        response["developmentOtp"] = json!(code);
    }
    Ok(Json(response))
}
