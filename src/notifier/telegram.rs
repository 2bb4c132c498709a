//! Telegram Bot API client (`sendMessage` only).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::{Notifier, NotifyError};
use crate::config::TelegramConfig;

/// sendMessage request body
#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
}

/// Bot API response envelope; only the fields the relay inspects
#[derive(Deserialize)]
struct BotApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

pub struct TelegramNotifier {
    config: TelegramConfig,
    client: reqwest::Client,
}

impl TelegramNotifier {
    pub fn new(config: TelegramConfig) -> Result<Self, NotifyError> {
        if config.bot_token.is_empty() || config.chat_id.is_empty() {
            error!("[TELEGRAM] bot token or chat id is not configured");
            return Err(NotifyError::NotConfigured);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                NotifyError::Request(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &TelegramConfig {
        &self.config
    }

    async fn post_message(&self, text: &str) -> Result<(), NotifyError> {
        let request = SendMessageRequest {
            chat_id: &self.config.chat_id,
            text,
            parse_mode: "HTML",
        };

        let response = self
            .client
            .post(self.config.send_message_url())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(NotifyError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: BotApiResponse =
            serde_json::from_str(&body).map_err(|e| NotifyError::Decode(format!("{}: {}", e, body)))?;

        if parsed.ok {
            Ok(())
        } else {
            Err(NotifyError::Api {
                description: parsed
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            })
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        match self.post_message(text).await {
            Ok(()) => {
                info!(
                    chat_id = %self.config.chat_id,
                    "[TELEGRAM] message sent to chat {}",
                    self.config.chat_id
                );
                Ok(())
            }
            Err(e) => {
                error!(kind = e.kind(), "[TELEGRAM] delivery failed: {}", e);
                Err(e)
            }
        }
    }
}
