//! WooCommerce webhook handler (the dispatcher)
//!
//! verify → parse → format → notify. Authentication problems are returned to
//! the caller as 4xx; anything that fails after that is logged and answered
//! with 200 so WooCommerce does not keep redelivering the same order.

use std::sync::Arc;

use axum::{Json, body::Bytes, extract::State, http::HeaderMap};
use serde_json::Value;
use tracing::{error, info, warn};

use super::super::error::{WebhookError, WebhookErrorCode};
use super::super::state::AppState;
use super::super::types::{ApiResponse, WebhookReceipt, WebhookRequest, error_codes};
use crate::order::{format_order_message, is_order};
use crate::signature::VerifyOutcome;

/// Receive a WooCommerce order webhook
///
/// Verifies `X-WC-Webhook-Signature` against the raw body, formats the order
/// and forwards it to Telegram.
///
/// - Missing signature header: 400
/// - Bad signature: 401
/// - Body is not JSON: 400
/// - Everything else: 200, with `code` telling what happened
#[utoipa::path(
    post,
    path = "/webhook",
    params(
        ("X-WC-Webhook-Signature" = String, Header, description = "base64(HMAC-SHA256(secret, raw body))"),
        ("X-WC-Webhook-Topic" = Option<String>, Header, description = "e.g. order.created"),
    ),
    request_body(content = String, description = "WooCommerce order JSON", content_type = "application/json"),
    responses(
        (status = 200, description = "Processed; code 0 delivered, 2001 not an order, 5001 format failed, 5002 delivery failed", body = WebhookReceipt, content_type = "application/json"),
        (status = 400, description = "Missing signature header or invalid JSON"),
        (status = 401, description = "Signature verification failed")
    ),
    security(("wc_webhook_signature" = [])),
    tag = "Webhook"
)]
pub async fn receive_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ApiResponse<WebhookReceipt>>, WebhookError> {
    let request = WebhookRequest::from_parts(&headers, body);
    info!(
        topic = request.topic.as_deref().unwrap_or("-"),
        source = request.source.as_deref().unwrap_or("-"),
        delivery_id = request.delivery_id.as_deref().unwrap_or("-"),
        body_len = request.body.len(),
        "[WEBHOOK] delivery received"
    );

    authenticate(&state, &request)?;

    let payload: Value = serde_json::from_slice(&request.body).map_err(|e| {
        warn!("[WEBHOOK] invalid JSON body: {}", e);
        WebhookError::new(
            WebhookErrorCode::InvalidJson,
            format!("Request body is not valid JSON: {}", e),
        )
    })?;

    Ok(Json(dispatch(&state, &request, &payload).await))
}

fn authenticate(state: &AppState, request: &WebhookRequest) -> Result<(), WebhookError> {
    let code = match state
        .verifier
        .verify(&request.body, request.signature.as_deref())
    {
        VerifyOutcome::Verified => return Ok(()),
        VerifyOutcome::MissingSignature => WebhookErrorCode::MissingSignature,
        VerifyOutcome::Mismatch => WebhookErrorCode::InvalidSignature,
        VerifyOutcome::MissingSecret => WebhookErrorCode::SecretNotConfigured,
    };
    Err(WebhookError::from_code(code))
}

/// Authenticated, parsed payload → outcome. Never fails towards the caller.
async fn dispatch(
    state: &AppState,
    request: &WebhookRequest,
    payload: &Value,
) -> ApiResponse<WebhookReceipt> {
    let mut receipt = WebhookReceipt::from(request);

    if !is_order(payload) {
        warn!("[WEBHOOK] received data does not look like an order");
        return ApiResponse::with_code(error_codes::NOT_AN_ORDER, "not an order", receipt);
    }

    let message = match format_order_message(payload) {
        Ok(message) => message,
        Err(e) => {
            error!("[WEBHOOK] order could not be formatted: {}", e);
            return ApiResponse::with_code(
                error_codes::FORMAT_FAILED,
                format!("format failed: {}", e),
                receipt,
            );
        }
    };
    receipt.order_number = Some(message.order_number().to_string());

    match state.notifier.send(message.as_str()).await {
        Ok(()) => {
            info!(
                order_number = %message.order_number(),
                "[WEBHOOK] order {} relayed",
                message.order_number()
            );
            ApiResponse::with_code(error_codes::SUCCESS, "delivered", receipt)
        }
        Err(e) => {
            error!(
                order_number = %message.order_number(),
                kind = e.kind(),
                "[WEBHOOK] order {} not delivered: {}",
                message.order_number(),
                e
            );
            ApiResponse::with_code(
                error_codes::DELIVERY_FAILED,
                format!("delivery failed: {}", e.kind()),
                receipt,
            )
        }
    }
}
