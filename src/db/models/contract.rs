use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: i64,
    pub user_id: i64,
    pub client_id: Option<i64>,
    pub quote_id: Option<i64>,
    pub title: String,
    /// KRW, whole won.
    pub amount: i64,
    pub is_demo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One contract clause. `sort_order` is unique per contract and drives the
/// render sequence; the wire key is `order`.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Clause {
    pub id: i64,
    pub contract_id: i64,
    #[serde(rename = "type")]
    pub clause_type: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "order")]
    pub sort_order: i32,
}

/// Signer types the handlers check against.
pub const SIGNER_CLIENT: &str = "client";
pub const SIGNER_USER: &str = "user";

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    pub id: i64,
    pub contract_id: i64,
    pub signer_type: String,
    pub signer_name: Option<String>,
    pub signed_at: DateTime<Utc>,
}
