#![allow(dead_code)]

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use barosign_api::middleware::session::SessionClaims;
use barosign_api::routes::{app, AppState};

pub struct TestApp {
    pub base_url: String,
    pub pool: PgPool,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Start an in-process server on an ephemeral port against
/// `TEST_DATABASE_URL`. Returns `None` when the variable is unset so the
/// suite passes on machines without a database.
pub async fn spawn_app() -> Result<Option<TestApp>> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set; skipping database-backed test");
        return Ok(None);
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .context("connecting to TEST_DATABASE_URL")?;
    barosign_api::db::migrate(&pool)
        .await
        .context("applying migrations")?;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("binding test listener")?;
    let base_url = format!("http://{}", listener.local_addr()?);

    let router = app(AppState { db: pool.clone() });
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });

    Ok(Some(TestApp {
        base_url,
        pool,
        client: reqwest::Client::new(),
    }))
}

pub fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

/// Session JWT for the given user, signed with the same secret the
/// server validates against.
pub fn session_token(user_id: i64) -> String {
    let claims = SessionClaims {
        sub: user_id,
        exp: (Utc::now().timestamp() + 3600) as usize,
    };
    let secret = &barosign_api::config::config().session.secret;
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("mint session token")
}

// Fixture rows. Tests build their own graphs with unique identifiers so
// suites can run concurrently against one database.

pub async fn create_user(pool: &PgPool) -> Result<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (username, name) VALUES ($1, $2) RETURNING id",
    )
    .bind(unique("user"))
    .bind("테스트 사용자")
    .fetch_one(pool)
    .await?;
    Ok(id)
}

pub async fn create_client_row(pool: &PgPool, user_id: i64) -> Result<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO clients (user_id, name, email, phone, business_number, memo) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
    )
    .bind(user_id)
    .bind("고객 주식회사")
    .bind("client@example.com")
    .bind("02-000-0000")
    .bind("123-45-67890")
    .bind("까다로운 고객")
    .fetch_one(pool)
    .await?;
    Ok(id)
}

pub async fn create_contract(
    pool: &PgPool,
    user_id: i64,
    client_id: Option<i64>,
) -> Result<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO contracts (user_id, client_id, title, amount) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(user_id)
    .bind(client_id)
    .bind("테스트 계약")
    .bind(1_000_000_i64)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

pub async fn insert_clause(
    pool: &PgPool,
    contract_id: i64,
    sort_order: i32,
    title: &str,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO clauses (contract_id, clause_type, title, content, sort_order) \
         VALUES ($1, 'general', $2, '', $3)",
    )
    .bind(contract_id)
    .bind(title)
    .bind(sort_order)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn create_service(pool: &PgPool, user_id: i64) -> Result<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO services (user_id, name, price) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(user_id)
    .bind("홈페이지 제작")
    .bind(2_000_000_i64)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

pub async fn create_quote(
    pool: &PgPool,
    user_id: i64,
    client_id: Option<i64>,
    service_id: Option<i64>,
) -> Result<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO quotes (user_id, client_id, service_id, title, amount, status) \
         VALUES ($1, $2, $3, $4, $5, 'sent') RETURNING id",
    )
    .bind(user_id)
    .bind(client_id)
    .bind(service_id)
    .bind("홈페이지 제작 견적")
    .bind(2_000_000_i64)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

pub async fn create_sign_token(
    pool: &PgPool,
    contract_id: i64,
    email: &str,
    expires_at: DateTime<Utc>,
    used: bool,
) -> Result<String> {
    let token = unique("sign");
    sqlx::query(
        "INSERT INTO sign_tokens (token, contract_id, email, expires_at, used) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(&token)
    .bind(contract_id)
    .bind(email)
    .bind(expires_at)
    .bind(used)
    .execute(pool)
    .await?;
    Ok(token)
}

pub async fn insert_signature(pool: &PgPool, contract_id: i64, signer_type: &str) -> Result<()> {
    sqlx::query(
        "INSERT INTO signatures (contract_id, signer_type, signer_name) VALUES ($1, $2, $3)",
    )
    .bind(contract_id)
    .bind(signer_type)
    .bind("서명자")
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn create_share(
    pool: &PgPool,
    service_id: Option<i64>,
    password: &str,
    is_active: bool,
    expires_at: Option<DateTime<Utc>>,
) -> Result<String> {
    let token = unique("share");
    let hash = bcrypt::hash(password, 4)?; // minimal cost keeps tests fast
    sqlx::query(
        "INSERT INTO shared_services (token, service_id, password_hash, is_active, expires_at) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(&token)
    .bind(service_id)
    .bind(hash)
    .bind(is_active)
    .bind(expires_at)
    .execute(pool)
    .await?;
    Ok(token)
}

/// OTP columns of a sign token, for asserting non-mutation.
pub async fn otp_state(pool: &PgPool, token: &str) -> Result<(Option<String>, Option<DateTime<Utc>>)> {
    let row = sqlx::query_as::<_, (Option<String>, Option<DateTime<Utc>>)>(
        "SELECT otp_code, otp_expires_at FROM sign_tokens WHERE token = $1",
    )
    .bind(token)
    .fetch_one(pool)
    .await?;
    Ok(row)
}
