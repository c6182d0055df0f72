use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// E-signature token row. Never serialized to the wire as-is: it carries
/// the OTP code.
#[derive(Debug, Clone, FromRow)]
pub struct SignToken {
    pub id: i64,
    pub token: String,
    pub contract_id: i64,
    pub email: String,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
    pub otp_code: Option<String>,
    pub otp_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
