//! Ordered preconditions for OTP issuance.
//!
//! Rules run in a fixed order and the first failure wins: token exists,
//! token unexpired, token unused, contract not yet client-signed,
//! submitted email matches. Later rules never run once one fails, so an
//! expired token is reported as expired even when its email would also
//! mismatch.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use thiserror::Error;
use tracing::instrument;

use crate::db;
use crate::db::models::SignToken;
use crate::error::ApiError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SigningRejection {
    #[error("sign token not found")]
    TokenNotFound,
    #[error("sign token expired")]
    TokenExpired,
    #[error("sign token already used")]
    TokenUsed,
    #[error("contract already carries a client signature")]
    AlreadySigned,
    #[error("submitted email does not match the token email")]
    EmailMismatch,
}

/// Run the full pipeline against the store and return the validated
/// token. Database errors map to the generic 500; rule failures map to
/// their Korean 400/404 envelopes.
#[instrument(skip_all)]
pub async fn run(
    pool: &PgPool,
    submitted_token: &str,
    submitted_email: &str,
) -> Result<SignToken, ApiError> {
    let token = db::sign_tokens::find_by_token(pool, submitted_token)
        .await?
        .ok_or(SigningRejection::TokenNotFound)?;

    check_token_state(&token, Utc::now())?;

    if db::sign_tokens::client_signature_exists(pool, token.contract_id).await? {
        return Err(SigningRejection::AlreadySigned.into());
    }

    check_email(&token, submitted_email)?;

    Ok(token)
}

/// Expiry before usage: a token that is both expired and used reports
/// expiry.
pub fn check_token_state(
    token: &SignToken,
    now: DateTime<Utc>,
) -> Result<(), SigningRejection> {
    if now > token.expires_at {
        return Err(SigningRejection::TokenExpired);
    }
    if token.used {
        return Err(SigningRejection::TokenUsed);
    }
    Ok(())
}

pub fn check_email(token: &SignToken, submitted_email: &str) -> Result<(), SigningRejection> {
    if token.email != submitted_email {
        return Err(SigningRejection::EmailMismatch);
    }
    Ok(())
}
