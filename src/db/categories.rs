//! Service category seeding.

use sqlx::PgPool;
use tracing::{info, instrument};

use crate::db::DbError;

/// Categories every fresh deployment starts with.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "디자인",
    "개발",
    "마케팅",
    "영상/사진",
    "번역/통역",
    "컨설팅",
    "기타",
];

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedOutcome {
    pub created: u32,
    pub skipped: u32,
}

/// Insert the default categories, skipping names that already exist.
/// Safe to run repeatedly.
#[instrument(skip(pool))]
pub async fn seed_defaults(pool: &PgPool) -> Result<SeedOutcome, DbError> {
    let mut outcome = SeedOutcome::default();
    for name in DEFAULT_CATEGORIES {
        let result = sqlx::query("INSERT INTO categories (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .execute(pool)
            .await?;
        if result.rows_affected() == 1 {
            outcome.created += 1;
        } else {
            outcome.skipped += 1;
        }
    }
    info!(created = outcome.created, skipped = outcome.skipped, "category seed finished");
    Ok(outcome)
}

#[instrument(skip(pool))]
pub async fn find_id_by_name(pool: &PgPool, name: &str) -> Result<Option<i64>, DbError> {
    let id = sqlx::query_scalar::<_, i64>("SELECT id FROM categories WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await?;
    Ok(id)
}
