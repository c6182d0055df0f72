//! User rows, onboarding state, and demo data cleanup.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{info, instrument, warn};

use crate::db::models::User;
use crate::db::DbError;

const USER_COLUMNS: &str = "id, username, email, name, role, onboarding_completed, \
                            onboarding_completed_at, created_at, updated_at";

#[instrument(skip(pool))]
pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, DbError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
    ))
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

/// Mark onboarding finished. Idempotent; the completion timestamp keeps
/// its first value, falling back to the submitted time and then the
/// server clock. Returns false when the user row no longer exists.
#[instrument(skip(pool))]
pub async fn complete_onboarding(
    pool: &PgPool,
    user_id: i64,
    completed_at: Option<DateTime<Utc>>,
) -> Result<bool, DbError> {
    let result = sqlx::query(
        "UPDATE users SET onboarding_completed = TRUE, \
         onboarding_completed_at = COALESCE(onboarding_completed_at, $2, now()), \
         updated_at = now() WHERE id = $1",
    )
    .bind(user_id)
    .bind(completed_at)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() == 1)
}

#[instrument(skip(pool))]
pub async fn set_role(pool: &PgPool, username: &str, role: &str) -> Result<bool, DbError> {
    let result = sqlx::query("UPDATE users SET role = $1, updated_at = now() WHERE username = $2")
        .bind(role)
        .bind(username)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() == 1)
}

/// Delete the user's demo-flagged rows, child tables first so foreign
/// keys stay satisfied. Runs after onboarding completes; a failed table
/// is logged and skipped so a partial purge never surfaces to the user.
#[instrument(skip(pool))]
pub async fn purge_demo_data(pool: &PgPool, user_id: i64) {
    for table in ["contracts", "quotes", "clients", "services"] {
        match delete_demo_rows(pool, table, user_id).await {
            Ok(0) => {}
            Ok(rows) => info!(table, rows, "removed demo rows"),
            Err(err) => warn!(table, error = %err, "demo purge failed for table"),
        }
    }
}

async fn delete_demo_rows(pool: &PgPool, table: &str, user_id: i64) -> Result<u64, DbError> {
    let result =
        sqlx::query(&format!("DELETE FROM {table} WHERE user_id = $1 AND is_demo = TRUE"))
            .bind(user_id)
            .execute(pool)
            .await?;
    Ok(result.rows_affected())
}

/// Insert a user if the username is free, otherwise return the existing
/// row. Seed helper; the API itself never creates users.
#[instrument(skip(pool))]
pub async fn find_or_create(
    pool: &PgPool,
    username: &str,
    email: Option<&str>,
    name: Option<&str>,
) -> Result<User, DbError> {
    if let Some(existing) = find_by_username(pool, username).await? {
        return Ok(existing);
    }
    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (username, email, name) VALUES ($1, $2, $3) RETURNING {USER_COLUMNS}"
    ))
    .bind(username)
    .bind(email)
    .bind(name)
    .fetch_one(pool)
    .await?;
    Ok(user)
}
