//! Session validation middleware.
//!
//! Sessions are HS256 JWTs issued by the auth frontend; this service
//! only validates them. The token arrives either as a bearer header or
//! as the `session` cookie.

use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::config;
use crate::error::{msg, ApiError};

pub const SESSION_COOKIE: &str = "session";

/// Claims carried by the session JWT. `sub` is the numeric user id.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: i64,
    pub exp: usize,
}

/// Authenticated caller context, injected as a request extension.
#[derive(Clone, Debug)]
pub struct AuthSession {
    pub user_id: i64,
}

/// Reject the request with the 401 envelope unless a valid session
/// token is present.
pub async fn require_session(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = token_from_headers(&headers).ok_or_else(login_required)?;

    let claims = decode_session(&token).map_err(|reason| {
        debug!(%reason, "rejected session token");
        ApiError::unauthorized(msg::LOGIN_REQUIRED)
    })?;

    request.extensions_mut().insert(AuthSession {
        user_id: claims.sub,
    });
    Ok(next.run(request).await)
}

fn login_required() -> ApiError {
    ApiError::unauthorized(msg::LOGIN_REQUIRED)
}

/// Bearer header wins over the cookie when both are present.
fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    bearer_token(headers).or_else(|| cookie_token(headers))
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == SESSION_COOKIE && !value.is_empty() {
            Some(value.to_string())
        } else {
            None
        }
    })
}

fn decode_session(token: &str) -> Result<SessionClaims, String> {
    let secret = &config().session.secret;
    if secret.is_empty() {
        return Err("session secret not configured".to_string());
    }

    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| e.to_string())?;

    Ok(token_data.claims)
}
