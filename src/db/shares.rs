//! Shared service link lookups for password-gated access.

use sqlx::PgPool;
use tracing::instrument;

use crate::db::models::SharedService;
use crate::db::DbError;

#[instrument(skip(pool, token))]
pub async fn find_by_token(pool: &PgPool, token: &str) -> Result<Option<SharedService>, DbError> {
    let row = sqlx::query_as::<_, SharedService>(
        "SELECT id, token, service_id, password_hash, is_active, expires_at, created_at \
         FROM shared_services WHERE token = $1",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
