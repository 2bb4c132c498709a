//! Gateway types module
//!
//! ## Input Types
//! - [`WebhookRequest`]: Raw body + WooCommerce headers of one delivery
//!
//! ## Output Types
//! - [`ApiResponse<T>`]: Unified API response wrapper
//! - [`WebhookReceipt`]: Outcome data attached to webhook responses

pub mod response;
pub mod webhook;

pub use response::{ApiResponse, error_codes};
pub use webhook::{
    HEADER_DELIVERY_ID, HEADER_SIGNATURE, HEADER_SOURCE, HEADER_TOPIC, WebhookReceipt,
    WebhookRequest,
};
