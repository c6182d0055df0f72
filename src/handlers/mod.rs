//! HTTP handlers, one module per feature area.

pub mod contracts;
pub mod onboarding;
pub mod public_contracts;
pub mod share;
pub mod signing;

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{msg, ApiError};

/// Unwrap an extracted JSON body, turning any rejection (missing body,
/// malformed JSON, wrong field types) into a 400 envelope with the
/// given message so axum's plain-text rejections never reach clients.
pub(crate) fn require_body<T: DeserializeOwned>(
    body: Result<Json<T>, JsonRejection>,
    message: &str,
) -> Result<T, ApiError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        debug!(%rejection, "request body rejected");
        ApiError::bad_request(message)
    })
}

/// Contract ids are numeric path segments; anything else behaves like a
/// contract that does not exist.
pub(crate) fn parse_contract_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::not_found(msg::CONTRACT_NOT_FOUND))
}
