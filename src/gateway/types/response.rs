//! API Response types and error codes
//!
//! - `ApiResponse<T>`: Unified response wrapper
//! - `error_codes`: Standard error code constants

use serde::Serialize;
use utoipa::ToSchema;

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
///
/// All API responses follow this structure:
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data, omitted when absent
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "delivered")]
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(data: T) -> Self {
        Self {
            code: error_codes::SUCCESS,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    /// Response carrying data alongside an explicit code.
    ///
    /// Used for webhook outcomes that are reported with HTTP 200 even when
    /// processing failed.
    pub fn with_code(code: i32, msg: impl Into<String>, data: T) -> Self {
        Self {
            code,
            msg: msg.into(),
            data: Some(data),
        }
    }

    /// Create error response
    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

// ============================================================================
// Error Codes
// ============================================================================

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Accepted but ignored (2xxx)
    pub const NOT_AN_ORDER: i32 = 2001;

    // Rejected deliveries (4xxx)
    pub const MISSING_SIGNATURE: i32 = 4001;
    pub const INVALID_SIGNATURE: i32 = 4002;
    pub const SECRET_NOT_CONFIGURED: i32 = 4003;
    pub const INVALID_JSON: i32 = 4004;

    // Processing failures, reported with HTTP 200 (5xxx)
    pub const FORMAT_FAILED: i32 = 5001;
    pub const DELIVERY_FAILED: i32 = 5002;
}
