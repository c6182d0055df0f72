use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: i64,
    pub user_id: i64,
    pub client_id: Option<i64>,
    pub service_id: Option<i64>,
    pub title: String,
    /// KRW, whole won.
    pub amount: i64,
    pub status: String,
    pub is_demo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
