use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::time::Duration;
use thiserror::Error;

pub const ENV_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const ENV_CHAT_ID: &str = "TELEGRAM_CHAT_ID";
pub const ENV_WEBHOOK_SECRET: &str = "WOOCOMMERCE_WEBHOOK_SECRET";

pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";
pub const DEFAULT_TELEGRAM_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config yaml: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Missing configuration variables: {}", .0.join(", "))]
    MissingSecrets(Vec<&'static str>),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub telegram: TelegramSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

/// Non-secret Telegram client settings (the token and chat id come from the environment)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TelegramSettings {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base() -> String {
    DEFAULT_TELEGRAM_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TELEGRAM_TIMEOUT_SECS
}

impl Default for TelegramSettings {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Load `config/<env>.yaml`
    pub fn load(env: &str) -> Result<Self, ConfigError> {
        Self::from_file(&format!("config/{}.yaml", env))
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Credentials the relay cannot run without.
///
/// Read once at startup; never stored in YAML and never printed.
#[derive(Clone)]
pub struct RelaySecrets {
    pub bot_token: String,
    pub chat_id: String,
    pub webhook_secret: String,
}

impl RelaySecrets {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve secrets through `lookup`, reporting every missing name at once.
    ///
    /// Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut fetch = |name: &'static str| match lookup(name) {
            Some(v) if !v.trim().is_empty() => v,
            _ => {
                missing.push(name);
                String::new()
            }
        };

        let bot_token = fetch(ENV_BOT_TOKEN);
        let chat_id = fetch(ENV_CHAT_ID);
        let webhook_secret = fetch(ENV_WEBHOOK_SECRET);

        if !missing.is_empty() {
            return Err(ConfigError::MissingSecrets(missing));
        }

        Ok(Self {
            bot_token,
            chat_id,
            webhook_secret,
        })
    }
}

impl fmt::Debug for RelaySecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelaySecrets")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("webhook_secret", &"<redacted>")
            .finish()
    }
}

/// Everything the Telegram notifier needs, assembled at construction.
#[derive(Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
    pub api_base: String,
    pub timeout: Duration,
}

impl TelegramConfig {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        let settings = TelegramSettings::default();
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            api_base: settings.api_base,
            timeout: Duration::from_secs(settings.timeout_secs),
        }
    }

    pub fn from_parts(secrets: &RelaySecrets, settings: &TelegramSettings) -> Self {
        Self {
            bot_token: secrets.bot_token.clone(),
            chat_id: secrets.chat_id.clone(),
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(settings.timeout_secs),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `<api_base>/bot<token>/sendMessage`
    pub fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.bot_token)
    }
}

impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_app_config_deserialize() {
        let yaml = r#"
log_level: "info"
log_dir: "./logs"
log_file: "relay.log"
use_json: false
rotation: "daily"
gateway:
  host: "0.0.0.0"
  port: 5000
telegram:
  timeout_secs: 5
"#;

        let config = AppConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.gateway.port, 5000);
        assert_eq!(config.telegram.timeout_secs, 5);
        // api_base omitted -> default
        assert_eq!(config.telegram.api_base, DEFAULT_TELEGRAM_API_BASE);
    }

    #[test]
    fn test_app_config_telegram_section_optional() {
        let yaml = r#"
log_level: "debug"
log_dir: "./logs"
log_file: "relay.log"
use_json: true
rotation: "never"
gateway:
  host: "127.0.0.1"
  port: 8080
"#;

        let config = AppConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.telegram.timeout_secs, DEFAULT_TELEGRAM_TIMEOUT_SECS);
    }

    #[test]
    fn test_app_config_rejects_bad_yaml() {
        let err = AppConfig::from_yaml_str("gateway: [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_config_file() {
        let err = AppConfig::from_file("config/does-not-exist.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_secrets_all_present() {
        let secrets = RelaySecrets::from_lookup(lookup_from(&[
            (ENV_BOT_TOKEN, "123:abc"),
            (ENV_CHAT_ID, "-100200"),
            (ENV_WEBHOOK_SECRET, "s3cret"),
        ]))
        .unwrap();

        assert_eq!(secrets.chat_id, "-100200");
        assert_eq!(secrets.webhook_secret, "s3cret");
    }

    #[test]
    fn test_secrets_reports_every_missing_name() {
        let err = RelaySecrets::from_lookup(lookup_from(&[(ENV_CHAT_ID, "42")])).unwrap_err();

        match err {
            ConfigError::MissingSecrets(names) => {
                assert_eq!(names, vec![ENV_BOT_TOKEN, ENV_WEBHOOK_SECRET]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_blank_secret_counts_as_missing() {
        let err = RelaySecrets::from_lookup(lookup_from(&[
            (ENV_BOT_TOKEN, "123:abc"),
            (ENV_CHAT_ID, "42"),
            (ENV_WEBHOOK_SECRET, "   "),
        ]))
        .unwrap_err();

        assert!(err.to_string().contains(ENV_WEBHOOK_SECRET));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let secrets = RelaySecrets {
            bot_token: "123:abc".to_string(),
            chat_id: "42".to_string(),
            webhook_secret: "s3cret".to_string(),
        };
        let rendered = format!("{:?}", secrets);
        assert!(!rendered.contains("123:abc"));
        assert!(!rendered.contains("s3cret"));

        let telegram = TelegramConfig::new("123:abc", "42");
        assert!(!format!("{:?}", telegram).contains("123:abc"));
    }

    #[test]
    fn test_send_message_url() {
        let config = TelegramConfig::new("123:abc", "42").with_api_base("http://localhost:9000/");
        assert_eq!(
            config.send_message_url(),
            "http://localhost:9000/bot123:abc/sendMessage"
        );
    }
}
