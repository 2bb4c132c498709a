//! WooCommerce → Telegram relay
//!
//! ```text
//! wc_telegram_relay [--env <name>] [--port <n>]   serve POST /webhook
//! wc_telegram_relay --demo [--env <name>]         format the sample order and send it
//! ```
//!
//! Settings come from `config/<env>.yaml`; the bot token, chat id and webhook
//! secret come from the environment (`TELEGRAM_BOT_TOKEN`, `TELEGRAM_CHAT_ID`,
//! `WOOCOMMERCE_WEBHOOK_SECRET`). A missing secret stops the relay before it
//! binds the port.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use wc_telegram_relay::config::{
    AppConfig, ENV_BOT_TOKEN, ENV_CHAT_ID, RelaySecrets, TelegramConfig,
};
use wc_telegram_relay::gateway::{self, AppState};
use wc_telegram_relay::logging::{init_fallback_logging, init_logging};
use wc_telegram_relay::notifier::{Notifier, TelegramNotifier};
use wc_telegram_relay::order::{format_order_message, sample_order};
use wc_telegram_relay::signature::SignatureVerifier;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

fn use_demo_mode() -> bool {
    std::env::args().any(|a| a == "--demo")
}

fn main() -> Result<()> {
    let env = get_env();
    let mut app_config = match AppConfig::load(&env) {
        Ok(config) => config,
        Err(e) => {
            init_fallback_logging();
            tracing::error!("Configuration error: {}", e);
            return Err(e).context("loading application config");
        }
    };
    let _log_guard = init_logging(&app_config);

    tracing::info!(
        "Starting wc_telegram_relay ({}) in {} mode",
        env!("RELAY_GIT_HASH"),
        env
    );

    let rt = tokio::runtime::Runtime::new().context("creating tokio runtime")?;

    if use_demo_mode() {
        return rt.block_on(run_demo(&app_config));
    }

    let secrets = match RelaySecrets::from_env() {
        Ok(secrets) => secrets,
        Err(e) => {
            tracing::error!("{}", e);
            tracing::error!("Relay exiting: configuration incomplete, not serving traffic");
            return Err(e).context("reading relay secrets");
        }
    };
    tracing::info!("Configuration loaded successfully.");

    if let Some(port) = get_port_override() {
        app_config.gateway.port = port;
    }

    let telegram = TelegramConfig::from_parts(&secrets, &app_config.telegram);
    let notifier = TelegramNotifier::new(telegram).context("building Telegram client")?;
    let state = Arc::new(AppState::new(
        SignatureVerifier::new(secrets.webhook_secret.clone()),
        Arc::new(notifier),
    ));

    rt.block_on(gateway::run_server(&app_config.gateway, state))
        .context("gateway server")?;

    tracing::info!("Relay stopped");
    Ok(())
}

/// Format the built-in sample order and, when credentials are present, send it.
async fn run_demo(app_config: &AppConfig) -> Result<()> {
    tracing::info!("Simulating webhook data for testing...");

    let message = format_order_message(&sample_order()).context("formatting sample order")?;
    tracing::info!("Formatted test message:\n{}", message);

    let token = std::env::var(ENV_BOT_TOKEN).unwrap_or_default();
    let chat_id = std::env::var(ENV_CHAT_ID).unwrap_or_default();
    if token.is_empty() || chat_id.is_empty() {
        tracing::warn!("Telegram token or chat ID not set, skipping sending test message.");
        return Ok(());
    }

    let telegram = TelegramConfig::new(token, chat_id)
        .with_api_base(app_config.telegram.api_base.clone())
        .with_timeout(Duration::from_secs(app_config.telegram.timeout_secs));

    let notifier = TelegramNotifier::new(telegram)?;
    match notifier.send(message.as_str()).await {
        Ok(()) => tracing::info!("Test message sent successfully to Telegram."),
        Err(e) => tracing::error!("Failed to send test message to Telegram: {}", e),
    }
    Ok(())
}
