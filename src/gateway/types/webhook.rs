use axum::body::Bytes;
use axum::http::HeaderMap;
use serde::Serialize;
use utoipa::ToSchema;

pub const HEADER_SIGNATURE: &str = "X-WC-Webhook-Signature";
pub const HEADER_TOPIC: &str = "X-WC-Webhook-Topic";
pub const HEADER_SOURCE: &str = "X-WC-Webhook-Source";
pub const HEADER_DELIVERY_ID: &str = "X-WC-Webhook-Delivery-ID";

/// One inbound delivery: raw body plus the WooCommerce headers.
#[derive(Debug, Clone)]
pub struct WebhookRequest {
    pub body: Bytes,
    pub signature: Option<String>,
    pub topic: Option<String>,
    pub source: Option<String>,
    pub delivery_id: Option<String>,
}

impl WebhookRequest {
    pub fn from_parts(headers: &HeaderMap, body: Bytes) -> Self {
        Self {
            body,
            signature: header_value(headers, HEADER_SIGNATURE),
            topic: header_value(headers, HEADER_TOPIC),
            source: header_value(headers, HEADER_SOURCE),
            delivery_id: header_value(headers, HEADER_DELIVERY_ID),
        }
    }
}

/// Non-UTF-8 header bytes are kept (lossily) so a garbled signature is a
/// mismatch rather than "missing".
fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).trim().to_string())
}

/// What the relay did with a delivery
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct WebhookReceipt {
    /// Order number as rendered in the notification
    #[schema(example = "WC-2024-12345")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,
    #[schema(example = "order.created")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_id: Option<String>,
}

impl From<&WebhookRequest> for WebhookReceipt {
    fn from(request: &WebhookRequest) -> Self {
        Self {
            order_number: None,
            topic: request.topic.clone(),
            delivery_id: request.delivery_id.clone(),
        }
    }
}
