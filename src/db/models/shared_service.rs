use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Password-protected public link to a service page. Never serialized to
/// the wire: it carries the password hash.
#[derive(Debug, Clone, FromRow)]
pub struct SharedService {
    pub id: i64,
    pub token: String,
    pub service_id: Option<i64>,
    pub password_hash: String,
    pub is_active: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
