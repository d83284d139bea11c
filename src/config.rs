//! # Configuration Module
//!
//! Startup configuration read from the process environment (and an optional
//! `.env` file loaded by `main`). Missing or invalid required values are fatal.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::dataset::DEFAULT_DATASET_PATH;

// Environment variable names
pub const BOT_TOKEN_VAR: &str = "BOT_TOKEN";
pub const LEGACY_BOT_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
pub const BOT_MODE_VAR: &str = "BOT_MODE";
pub const WEBHOOK_BASE_URL_VAR: &str = "WEBHOOK_BASE_URL";
pub const DATASET_PATH_VAR: &str = "MEDICINES_CSV";
pub const HOST_VAR: &str = "HOST";
pub const PORT_VAR: &str = "PORT";
pub const LOG_FORMAT_VAR: &str = "LOG_FORMAT";

pub const DEFAULT_PORT: u16 = 8080;

/// Errors raised while reading the configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// No bot token was supplied
    MissingToken,
    /// A variable was set to a value that cannot be used
    InvalidValue { variable: &'static str, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingToken => write!(
                f,
                "{BOT_TOKEN_VAR} environment variable is required (or {LEGACY_BOT_TOKEN_VAR})"
            ),
            ConfigError::InvalidValue { variable, value } => {
                write!(f, "Invalid value for {variable}: '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// How updates reach the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryMode {
    /// Long-polling `getUpdates`
    #[default]
    Polling,
    /// Telegram pushes updates to an HTTP endpoint
    Webhook,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Runtime configuration for the bot
#[derive(Clone, PartialEq)]
pub struct BotConfig {
    pub bot_token: String,
    pub mode: DeliveryMode,
    /// Public base URL without trailing slash, e.g. `https://medguide.example.com`
    pub webhook_base_url: Option<String>,
    pub dataset_path: PathBuf,
    pub host: IpAddr,
    pub port: u16,
    pub log_format: LogFormat,
}

// Keeps the token out of debug logs
impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("bot_token", &"<redacted>")
            .field("mode", &self.mode)
            .field("webhook_base_url", &self.webhook_base_url)
            .field("dataset_path", &self.dataset_path)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl BotConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bot_token = var(BOT_TOKEN_VAR)
            .or_else(|| var(LEGACY_BOT_TOKEN_VAR))
            .ok_or(ConfigError::MissingToken)?;

        let mode = match var(BOT_MODE_VAR) {
            None => DeliveryMode::default(),
            Some(value) => match value.to_lowercase().as_str() {
                "polling" | "poll" => DeliveryMode::Polling,
                "webhook" => DeliveryMode::Webhook,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        variable: BOT_MODE_VAR,
                        value,
                    })
                }
            },
        };

        let webhook_base_url = match var(WEBHOOK_BASE_URL_VAR) {
            None => None,
            Some(value) => {
                if reqwest::Url::parse(&value).is_err() {
                    return Err(ConfigError::InvalidValue {
                        variable: WEBHOOK_BASE_URL_VAR,
                        value,
                    });
                }
                Some(value.trim_end_matches('/').to_string())
            }
        };

        let dataset_path = var(DATASET_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_PATH));

        let host = match var(HOST_VAR) {
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                variable: HOST_VAR,
                value,
            })?,
        };

        let port = match var(PORT_VAR) {
            None => DEFAULT_PORT,
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                variable: PORT_VAR,
                value,
            })?,
        };

        let log_format = match var(LOG_FORMAT_VAR) {
            None => LogFormat::default(),
            Some(value) => match value.to_lowercase().as_str() {
                "text" | "pretty" => LogFormat::Text,
                "json" => LogFormat::Json,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        variable: LOG_FORMAT_VAR,
                        value,
                    })
                }
            },
        };

        Ok(Self {
            bot_token,
            mode,
            webhook_base_url,
            dataset_path,
            host,
            port,
            log_format,
        })
    }

    /// Full URL Telegram should deliver updates to: `{base}/{token}`
    pub fn webhook_url(&self) -> Option<String> {
        self.webhook_base_url
            .as_ref()
            .map(|base| format!("{}/{}", base, self.bot_token))
    }

    /// Socket address the webhook server binds to
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_output_redacts_token() {
        let config = BotConfig::from_lookup(|key| match key {
            BOT_TOKEN_VAR => Some("123:secret".to_string()),
            _ => None,
        })
        .unwrap();

        let debug = format!("{config:?}");
        assert!(!debug.contains("123:secret"));
        assert!(debug.contains("<redacted>"));
    }
}
