//! Outbound notification delivery.
//!
//! The relay talks to exactly one destination, a Telegram chat, but the
//! dispatcher only sees the [`Notifier`] trait so tests can swap in a fake.

pub mod error;
pub mod telegram;

use async_trait::async_trait;

pub use error::NotifyError;
pub use telegram::TelegramNotifier;

/// Deliver one pre-rendered message. Implementations must not retry.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}
