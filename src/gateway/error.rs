//! Webhook rejection errors.
//!
//! Only failures that the webhook source should see become a `WebhookError`:
//! a missing or bad signature and an unreadable body. Processing failures
//! after authentication are reported with HTTP 200 instead.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::types::{ApiResponse, error_codes};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum WebhookErrorCode {
    /// 4001: X-WC-Webhook-Signature absent or empty
    MissingSignature = error_codes::MISSING_SIGNATURE,
    /// 4002: Signature does not match the body
    InvalidSignature = error_codes::INVALID_SIGNATURE,
    /// 4003: No webhook secret to verify against
    SecretNotConfigured = error_codes::SECRET_NOT_CONFIGURED,
    /// 4004: Body is not valid JSON
    InvalidJson = error_codes::INVALID_JSON,
}

impl WebhookErrorCode {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::MissingSignature => "MISSING_SIGNATURE",
            Self::InvalidSignature => "INVALID_SIGNATURE",
            Self::SecretNotConfigured => "SECRET_NOT_CONFIGURED",
            Self::InvalidJson => "INVALID_JSON",
        }
    }

    pub fn http_status(self) -> StatusCode {
        match self {
            Self::MissingSignature | Self::InvalidJson => StatusCode::BAD_REQUEST,
            Self::InvalidSignature | Self::SecretNotConfigured => StatusCode::UNAUTHORIZED,
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("{}: {}", .code.name(), .message)]
pub struct WebhookError {
    pub code: WebhookErrorCode,
    pub message: String,
}

impl WebhookError {
    pub fn new(code: WebhookErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Error with the default message for `code`
    pub fn from_code(code: WebhookErrorCode) -> Self {
        let message = match code {
            WebhookErrorCode::MissingSignature => "Missing X-WC-Webhook-Signature header",
            WebhookErrorCode::InvalidSignature => "Webhook signature verification failed",
            // Deliberately as vague as a mismatch towards the caller
            WebhookErrorCode::SecretNotConfigured => "Webhook signature verification failed",
            WebhookErrorCode::InvalidJson => "Request body is not valid JSON",
        };
        Self::new(code, message)
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let body = ApiResponse::<()>::error(self.code.code(), self.message);
        (self.code.http_status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(WebhookErrorCode::MissingSignature.code(), 4001);
        assert_eq!(WebhookErrorCode::InvalidJson.code(), 4004);
    }

    #[test]
    fn test_http_status() {
        assert_eq!(
            WebhookErrorCode::MissingSignature.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WebhookErrorCode::InvalidSignature.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            WebhookErrorCode::SecretNotConfigured.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            WebhookErrorCode::InvalidJson.http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_error_from_code() {
        let err = WebhookError::from_code(WebhookErrorCode::MissingSignature);
        assert_eq!(err.code, WebhookErrorCode::MissingSignature);
        assert!(err.message.contains("X-WC-Webhook-Signature"));
        assert!(err.to_string().starts_with("MISSING_SIGNATURE"));
    }

    #[test]
    fn test_error_display_and_source() {
        let err = WebhookError::new(WebhookErrorCode::InvalidJson, "expected value at line 1");
        assert_eq!(err.to_string(), "INVALID_JSON: expected value at line 1");

        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert!(boxed.source().is_none());
    }

    #[test]
    fn test_into_response_status() {
        let response = WebhookError::from_code(WebhookErrorCode::InvalidSignature).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
