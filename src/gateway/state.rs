use std::sync::Arc;
use std::time::Instant;

use crate::notifier::Notifier;
use crate::signature::SignatureVerifier;

/// Gateway application state (shared, read-only)
#[derive(Clone)]
pub struct AppState {
    /// Verifier bound to the WooCommerce webhook secret
    pub verifier: SignatureVerifier,
    /// Destination for formatted orders
    pub notifier: Arc<dyn Notifier>,
    started_at: Instant,
}

impl AppState {
    pub fn new(verifier: SignatureVerifier, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            verifier,
            notifier,
            started_at: Instant::now(),
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
