//! One-time code generation for the signing flow.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// Codes stay valid for exactly five minutes from issuance.
pub const OTP_TTL_MINUTES: i64 = 5;

/// Six decimal digits, never with a leading zero.
pub fn generate_code() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

pub fn expiry_from(issued_at: DateTime<Utc>) -> DateTime<Utc> {
    issued_at + Duration::minutes(OTP_TTL_MINUTES)
}
