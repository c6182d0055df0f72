use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Owner-facing client row. The public contract view serializes its own
/// redacted projection instead of this struct.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub business_number: Option<String>,
    pub memo: Option<String>,
    pub is_demo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
