use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Telegram bot token or chat id is not configured")]
    NotConfigured,

    #[error("Request to Telegram API timed out")]
    Timeout,

    #[error("Could not connect to Telegram API: {0}")]
    Connection(String),

    #[error("Telegram API HTTP error: {status} - {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Telegram API error: {description}")]
    Api { description: String },

    #[error("Could not decode JSON response from Telegram: {0}")]
    Decode(String),

    #[error("Unexpected error while sending message to Telegram: {0}")]
    Request(String),
}

impl NotifyError {
    /// Short failure class for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotConfigured => "not-configured",
            Self::Timeout => "timeout",
            Self::Connection(_) => "connection",
            Self::HttpStatus { .. } => "http-status",
            Self::Api { .. } => "api",
            Self::Decode(_) => "decode",
            Self::Request(_) => "request",
        }
    }
}

impl From<reqwest::Error> for NotifyError {
    fn from(e: reqwest::Error) -> Self {
        // The request URL embeds the bot token; keep it out of messages
        let e = e.without_url();
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_connect() {
            Self::Connection(e.to_string())
        } else if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Request(e.to_string())
        }
    }
}
