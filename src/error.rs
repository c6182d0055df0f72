// HTTP API error types and the fixed client-facing wire text.
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// Client-facing message catalog. These strings are part of the wire
/// contract; log output stays English.
pub mod msg {
    pub const BAD_REQUEST: &str = "요청 값이 올바르지 않습니다.";
    pub const OTP_INPUT_REQUIRED: &str = "토큰과 이메일을 입력해주세요.";
    pub const SIGN_TOKEN_EXPIRED: &str = "만료된 서명 요청입니다. 계약서를 다시 요청해주세요.";
    pub const SIGN_TOKEN_USED: &str = "이미 사용된 서명 요청입니다.";
    pub const ALREADY_SIGNED: &str = "이미 서명이 완료된 계약서입니다.";
    pub const EMAIL_MISMATCH: &str = "이메일이 일치하지 않습니다.";
    pub const LOGIN_REQUIRED: &str = "로그인이 필요합니다.";
    pub const SHARE_PASSWORD_MISMATCH: &str = "비밀번호가 일치하지 않습니다.";
    pub const CONTRACT_NOT_FOUND: &str = "계약서를 찾을 수 없습니다.";
    pub const QUOTE_NOT_FOUND: &str = "견적서를 찾을 수 없습니다.";
    pub const SIGN_TOKEN_NOT_FOUND: &str = "유효하지 않은 서명 요청입니다.";
    pub const SHARE_NOT_FOUND: &str = "유효하지 않은 링크입니다.";
    pub const METHOD_NOT_ALLOWED: &str = "허용되지 않은 메서드입니다.";
    pub const INTERNAL: &str = "서버 오류가 발생했습니다.";
    pub const OTP_SENT: &str = "인증번호가 이메일로 발송되었습니다.";
    pub const SHARE_VERIFIED: &str = "인증되었습니다.";
}

/// HTTP API error with the status codes the service actually uses.
/// Everything client-visible goes through the `{"error": ...}` envelope.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // 405 Method Not Allowed
    MethodNotAllowed,

    // 500 Internal Server Error; detail is exposed only where the public
    // contract handler's contract says so
    Internal { details: Option<String> },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn method_not_allowed() -> Self {
        ApiError::MethodNotAllowed
    }

    pub fn internal() -> Self {
        ApiError::Internal { details: None }
    }

    pub fn internal_with_details(details: impl Into<String>) -> Self {
        ApiError::Internal {
            details: Some(details.into()),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(m) | ApiError::Unauthorized(m) | ApiError::NotFound(m) => m,
            ApiError::MethodNotAllowed => msg::METHOD_NOT_ALLOWED,
            ApiError::Internal { .. } => msg::INTERNAL,
        }
    }

    /// Convert to the JSON envelope: `{"error": ...}` plus `details` where
    /// the error carries them.
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::Internal {
                details: Some(details),
            } => json!({ "error": msg::INTERNAL, "details": details }),
            _ => json!({ "error": self.message() }),
        }
    }
}

impl From<crate::db::DbError> for ApiError {
    fn from(err: crate::db::DbError) -> Self {
        // Log the real error but return the generic Korean message
        tracing::error!("database error: {err}");
        ApiError::internal()
    }
}

impl From<crate::signing::SigningRejection> for ApiError {
    fn from(rejection: crate::signing::SigningRejection) -> Self {
        use crate::signing::SigningRejection::*;
        match rejection {
            TokenNotFound => ApiError::not_found(msg::SIGN_TOKEN_NOT_FOUND),
            TokenExpired => ApiError::bad_request(msg::SIGN_TOKEN_EXPIRED),
            TokenUsed => ApiError::bad_request(msg::SIGN_TOKEN_USED),
            AlreadySigned => ApiError::bad_request(msg::ALREADY_SIGNED),
            EmailMismatch => ApiError::bad_request(msg::EMAIL_MISMATCH),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(
            ApiError::bad_request(msg::BAD_REQUEST).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::unauthorized(msg::LOGIN_REQUIRED).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::not_found(msg::CONTRACT_NOT_FOUND).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::method_not_allowed().status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            ApiError::internal().status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn envelope_is_error_key_only() {
        let v = ApiError::not_found(msg::CONTRACT_NOT_FOUND).to_json();
        assert_eq!(v["error"], msg::CONTRACT_NOT_FOUND);
        assert!(v.get("details").is_none());
    }

    #[test]
    fn signing_rejections_map_to_wire_envelopes() {
        use crate::signing::SigningRejection;

        let err: ApiError = SigningRejection::TokenExpired.into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.message().contains("만료"));

        let err: ApiError = SigningRejection::TokenNotFound.into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err: ApiError = SigningRejection::EmailMismatch.into();
        assert_eq!(err.message(), msg::EMAIL_MISMATCH);
    }

    #[test]
    fn internal_details_are_exposed_only_when_carried() {
        let v = ApiError::internal().to_json();
        assert!(v.get("details").is_none());

        let v = ApiError::internal_with_details("boom").to_json();
        assert_eq!(v["error"], msg::INTERNAL);
        assert_eq!(v["details"], "boom");
    }
}
