//! Sign token lookups and OTP persistence for the client signing flow.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use crate::db::models::SignToken;
use crate::db::DbError;

#[instrument(skip(pool, token))]
pub async fn find_by_token(pool: &PgPool, token: &str) -> Result<Option<SignToken>, DbError> {
    let row = sqlx::query_as::<_, SignToken>(
        "SELECT id, token, contract_id, email, expires_at, used, otp_code, otp_expires_at, \
         created_at FROM sign_tokens WHERE token = $1",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Persist a freshly issued OTP. The `used = FALSE` guard keeps a token
/// that was consumed between precheck and write from being revived;
/// returns whether the row was actually updated.
#[instrument(skip(pool, code))]
pub async fn store_otp(
    pool: &PgPool,
    token_id: i64,
    code: &str,
    expires_at: DateTime<Utc>,
) -> Result<bool, DbError> {
    let result = sqlx::query(
        "UPDATE sign_tokens SET otp_code = $1, otp_expires_at = $2 \
         WHERE id = $3 AND used = FALSE",
    )
    .bind(code)
    .bind(expires_at)
    .bind(token_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() == 1)
}

/// Whether the contract already carries a client-side signature.
#[instrument(skip(pool))]
pub async fn client_signature_exists(pool: &PgPool, contract_id: i64) -> Result<bool, DbError> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM signatures WHERE contract_id = $1 AND signer_type = $2)",
    )
    .bind(contract_id)
    .bind(crate::db::models::SIGNER_CLIENT)
    .fetch_one(pool)
    .await?;
    Ok(exists)
}
