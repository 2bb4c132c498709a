//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:5000/docs`
//! - OpenAPI JSON: `http://localhost:5000/api-docs/openapi.json`

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::gateway::handlers::HealthResponse;
use crate::gateway::types::WebhookReceipt;

/// WooCommerce HMAC signature header
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "wc_webhook_signature",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "X-WC-Webhook-Signature",
                    r#"WooCommerce webhook signature: base64(HMAC-SHA256(secret, raw request body))

The secret is the one entered when creating the webhook in WooCommerce."#,
                ))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "WooCommerce → Telegram Relay",
        version = "0.1.0",
        description = "Receives signed WooCommerce order webhooks and relays them to a Telegram chat.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:5000", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::webhook::receive_webhook,
        crate::gateway::handlers::health::health_check,
    ),
    components(
        schemas(WebhookReceipt, HealthResponse)
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Webhook", description = "Inbound WooCommerce deliveries"),
        (name = "System", description = "Health")
    )
)]
pub struct ApiDoc;
