//! HTTP gateway: the webhook endpoint, health check and API docs.

pub mod error;
pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::GatewayConfig;
pub use error::{WebhookError, WebhookErrorCode};
pub use state::AppState;

/// Build the complete router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // WooCommerce deliveries
        .route("/webhook", post(handlers::receive_webhook))
        .route("/webhook/woocommerce", post(handlers::receive_webhook))
        // Health check
        .route("/api/v1/health", get(handlers::health_check))
        .with_state(state)
        // OpenAPI / Swagger UI (stateless, added after with_state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
}

/// Start the HTTP gateway and serve until Ctrl-C / SIGTERM.
pub async fn run_server(config: &GatewayConfig, state: Arc<AppState>) -> std::io::Result<()> {
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        error!(
            "Failed to bind to {}: {} (port {} may already be in use)",
            addr, e, config.port
        );
        e
    })?;

    info!("🚀 Relay listening on http://{}", addr);
    info!("📮 Webhook endpoint: POST http://{}/webhook", addr);
    info!("📖 API Docs: http://{}/docs", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::{Notifier, NotifyError};
    use crate::order::sample_order;
    use crate::signature::{SignatureVerifier, sign};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use std::sync::Mutex;
    use tower::ServiceExt;

    const SECRET: &str = "wc-test-secret";

    /// Records every message; optionally fails every send
    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, text: &str) -> Result<(), NotifyError> {
            self.sent.lock().unwrap().push(text.to_string());
            if self.fail {
                Err(NotifyError::Timeout)
            } else {
                Ok(())
            }
        }
    }

    fn app_with(notifier: Arc<RecordingNotifier>, secret: &str) -> Router {
        router(Arc::new(AppState::new(SignatureVerifier::new(secret), notifier)))
    }

    fn signed(uri: &str, body: &str, secret: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .header("X-WC-Webhook-Signature", sign(body.as_bytes(), secret))
            .header("X-WC-Webhook-Topic", "order.created")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_missing_signature_is_400() {
        let notifier = Arc::new(RecordingNotifier::default());
        let app = app_with(notifier.clone(), SECRET);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/webhook")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["code"], 4001);
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_wrong_signature_is_401() {
        let notifier = Arc::new(RecordingNotifier::default());
        let app = app_with(notifier.clone(), SECRET);

        let response = app
            .oneshot(signed("/webhook", r#"{"id":1}"#, "some-other-secret"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["code"], 4002);
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_secret_fails_closed() {
        let notifier = Arc::new(RecordingNotifier::default());
        let app = app_with(notifier.clone(), "");

        let response = app
            .oneshot(signed("/webhook", r#"{"id":1}"#, ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["code"], 4003);
    }

    #[tokio::test]
    async fn test_invalid_json_is_400() {
        let app = app_with(Arc::new(RecordingNotifier::default()), SECRET);

        let response = app
            .oneshot(signed("/webhook", "webhook_id=12", SECRET))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["code"], 4004);
    }

    #[tokio::test]
    async fn test_not_an_order_is_200() {
        let notifier = Arc::new(RecordingNotifier::default());
        let app = app_with(notifier.clone(), SECRET);

        let response = app.oneshot(signed("/webhook", "{}", SECRET)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["code"], 2001);
        assert_eq!(body["msg"], "not an order");
        assert_eq!(body["data"]["topic"], "order.created");
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_order_is_formatted_and_delivered() {
        let notifier = Arc::new(RecordingNotifier::default());
        let app = app_with(notifier.clone(), SECRET);
        let body = sample_order().to_string();

        let response = app
            .oneshot(signed("/webhook/woocommerce", &body, SECRET))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["code"], 0);
        assert_eq!(json["msg"], "delivered");
        assert_eq!(json["data"]["order_number"], "WC-2024-12345");

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("John Doe"));
        assert!(sent[0].contains("$150.75"));
    }

    #[tokio::test]
    async fn test_null_id_is_still_an_order() {
        let notifier = Arc::new(RecordingNotifier::default());
        let app = app_with(notifier.clone(), SECRET);

        let response = app
            .oneshot(signed("/webhook", r#"{"id":null}"#, SECRET))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["code"], 0);
        assert_eq!(json["data"]["order_number"], "N/A");

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("<b>Order #:</b> N/A"));
    }

    #[tokio::test]
    async fn test_delivery_failure_is_swallowed() {
        let notifier = Arc::new(RecordingNotifier {
            fail: true,
            ..Default::default()
        });
        let app = app_with(notifier.clone(), SECRET);

        let response = app
            .oneshot(signed("/webhook", r#"{"id":5,"number":"WC-5"}"#, SECRET))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["code"], 5002);
        assert_eq!(json["msg"], "delivery failed: timeout");
        assert_eq!(json["data"]["order_number"], "WC-5");
        assert_eq!(notifier.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_format_failure_is_swallowed() {
        let notifier = Arc::new(RecordingNotifier::default());
        let app = app_with(notifier.clone(), SECRET);

        let response = app
            .oneshot(signed("/webhook", r#"{"id":5,"billing":"oops"}"#, SECRET))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["code"], 5001);
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = app_with(Arc::new(RecordingNotifier::default()), SECRET);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["code"], 0);
        assert!(json["data"]["timestamp_ms"].as_u64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_get_on_webhook_not_allowed() {
        let app = app_with(Arc::new(RecordingNotifier::default()), SECRET);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/webhook")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
