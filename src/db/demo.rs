//! Demo fixture rows a fresh user sees before onboarding completes.
//!
//! Everything inserted here carries `is_demo = TRUE` and is removed by
//! [`crate::db::users::purge_demo_data`] once onboarding finishes.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::db::DbError;

/// Handles the operator needs to exercise the signing and share flows
/// against the seeded rows.
#[derive(Debug)]
pub struct DemoSeed {
    pub contract_id: i64,
    pub sign_token: String,
    pub share_token: String,
}

const DEMO_CLAUSES: &[(&str, &str, &str)] = &[
    (
        "purpose",
        "계약의 목적",
        "본 계약은 홈페이지 제작 용역의 범위와 조건을 정한다.",
    ),
    (
        "payment",
        "대금 지급",
        "계약금 30%는 계약 체결 시, 잔금 70%는 검수 완료 후 7일 이내 지급한다.",
    ),
    (
        "confidentiality",
        "비밀 유지",
        "양 당사자는 업무상 알게 된 상대방의 정보를 제3자에게 누설하지 않는다.",
    ),
];

/// Whether the user already owns demo rows; seeding checks this so the
/// command stays idempotent per user.
#[instrument(skip(pool))]
pub async fn has_demo_data(pool: &PgPool, user_id: i64) -> Result<bool, DbError> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM clients WHERE user_id = $1 AND is_demo = TRUE)",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    Ok(exists)
}

/// Populate one of everything for the given user: client, service,
/// quote, contract with standard clauses signed on the owner side, an
/// open sign token, and a password-gated share link. Single transaction.
#[instrument(skip(pool, owner_name, share_password_hash))]
pub async fn seed_for_user(
    pool: &PgPool,
    user_id: i64,
    owner_name: &str,
    share_password_hash: &str,
) -> Result<DemoSeed, DbError> {
    let category_id = crate::db::categories::find_id_by_name(pool, "개발").await?;

    let mut tx = pool.begin().await?;

    let client_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO clients (user_id, name, email, phone, business_number, memo, is_demo) \
         VALUES ($1, $2, $3, $4, $5, $6, TRUE) RETURNING id",
    )
    .bind(user_id)
    .bind("샘플 주식회사")
    .bind("contact@sample.example")
    .bind("02-1234-5678")
    .bind("123-45-67890")
    .bind("데모 데이터입니다. 온보딩을 마치면 사라집니다.")
    .fetch_one(&mut *tx)
    .await?;

    let service_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO services (user_id, category_id, name, description, price, is_demo) \
         VALUES ($1, $2, $3, $4, $5, TRUE) RETURNING id",
    )
    .bind(user_id)
    .bind(category_id)
    .bind("홈페이지 제작")
    .bind("반응형 홈페이지 기획, 디자인, 개발")
    .bind(2_000_000_i64)
    .fetch_one(&mut *tx)
    .await?;

    let quote_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO quotes (user_id, client_id, service_id, title, amount, status, is_demo) \
         VALUES ($1, $2, $3, $4, $5, 'sent', TRUE) RETURNING id",
    )
    .bind(user_id)
    .bind(client_id)
    .bind(service_id)
    .bind("홈페이지 제작 견적")
    .bind(2_000_000_i64)
    .fetch_one(&mut *tx)
    .await?;

    let contract_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO contracts (user_id, client_id, quote_id, title, amount, is_demo) \
         VALUES ($1, $2, $3, $4, $5, TRUE) RETURNING id",
    )
    .bind(user_id)
    .bind(client_id)
    .bind(quote_id)
    .bind("홈페이지 제작 계약")
    .bind(2_000_000_i64)
    .fetch_one(&mut *tx)
    .await?;

    for (index, (clause_type, title, content)) in DEMO_CLAUSES.iter().enumerate() {
        sqlx::query(
            "INSERT INTO clauses (contract_id, clause_type, title, content, sort_order) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(contract_id)
        .bind(clause_type)
        .bind(title)
        .bind(content)
        .bind(index as i32 + 1)
        .execute(&mut *tx)
        .await?;
    }

    // Owner has signed; the client-side signature arrives through the
    // OTP flow, so the seeded sign token below stays issuable.
    sqlx::query(
        "INSERT INTO signatures (contract_id, signer_type, signer_name) VALUES ($1, $2, $3)",
    )
    .bind(contract_id)
    .bind(crate::db::models::SIGNER_USER)
    .bind(owner_name)
    .execute(&mut *tx)
    .await?;

    let sign_token = Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO sign_tokens (token, contract_id, email, expires_at) \
         VALUES ($1, $2, $3, $4)",
    )
    .bind(&sign_token)
    .bind(contract_id)
    .bind("contact@sample.example")
    .bind(Utc::now() + Duration::days(7))
    .execute(&mut *tx)
    .await?;

    let share_token = Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO shared_services (token, service_id, password_hash, is_active) \
         VALUES ($1, $2, $3, TRUE)",
    )
    .bind(&share_token)
    .bind(service_id)
    .bind(share_password_hash)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(DemoSeed {
        contract_id,
        sign_token,
        share_token,
    })
}
