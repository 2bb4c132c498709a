//! wc_telegram_relay - WooCommerce → Telegram order relay
//!
//! WooCommerce delivers order webhooks; the relay authenticates them with the
//! shared webhook secret, renders the order as an HTML message and forwards it
//! to a Telegram chat.
//!
//! # Modules
//!
//! - [`config`] - YAML settings + secrets from the environment
//! - [`logging`] - tracing subscriber / rolling file setup
//! - [`signature`] - HMAC-SHA256 webhook signature verification
//! - [`order`] - OrderRecord model and the Telegram message formatter
//! - [`notifier`] - Telegram Bot API client
//! - [`gateway`] - axum HTTP endpoint (the dispatcher)
//!
//! ```text
//! ┌──────────┐    ┌───────────┐    ┌───────────┐    ┌──────────┐
//! │ Webhook  │───▶│ Signature │───▶│ Formatter │───▶│ Notifier │
//! │  (POST)  │    │  (HMAC)   │    │  (HTML)   │    │(Telegram)│
//! └──────────┘    └───────────┘    └───────────┘    └──────────┘
//! ```

pub mod config;
pub mod gateway;
pub mod logging;
pub mod notifier;
pub mod order;
pub mod signature;

// Convenient re-exports at crate root
pub use config::{AppConfig, ConfigError, RelaySecrets, TelegramConfig};
pub use notifier::{Notifier, NotifyError, TelegramNotifier};
pub use order::{FormatError, FormattedMessage, OrderRecord, format_order_message, is_order};
pub use signature::{SignatureVerifier, VerifyOutcome, sign, verify};
