//! # Configuration Tests

use medguide::config::*;
use std::collections::HashMap;
use std::path::PathBuf;

fn config_from(vars: &[(&str, &str)]) -> Result<BotConfig, ConfigError> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    BotConfig::from_lookup(|key| vars.get(key).cloned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = config_from(&[(BOT_TOKEN_VAR, "123:abc")]).unwrap();

        assert_eq!(config.bot_token, "123:abc");
        assert_eq!(config.mode, DeliveryMode::Polling);
        assert_eq!(config.webhook_base_url, None);
        assert_eq!(config.webhook_url(), None);
        assert_eq!(config.dataset_path, PathBuf::from("data/medicines.csv"));
        assert_eq!(config.listen_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_missing_token_is_fatal() {
        assert_eq!(config_from(&[]).unwrap_err(), ConfigError::MissingToken);
        assert_eq!(
            config_from(&[(BOT_TOKEN_VAR, "   ")]).unwrap_err(),
            ConfigError::MissingToken
        );
        assert!(ConfigError::MissingToken.to_string().contains("BOT_TOKEN"));
    }

    #[test]
    fn test_legacy_token_variable() {
        let config = config_from(&[(LEGACY_BOT_TOKEN_VAR, "legacy")]).unwrap();
        assert_eq!(config.bot_token, "legacy");

        let config = config_from(&[(BOT_TOKEN_VAR, "new"), (LEGACY_BOT_TOKEN_VAR, "legacy")]).unwrap();
        assert_eq!(config.bot_token, "new");
    }

    #[test]
    fn test_webhook_settings() {
        let config = config_from(&[
            (BOT_TOKEN_VAR, "123:abc"),
            (BOT_MODE_VAR, "Webhook"),
            (WEBHOOK_BASE_URL_VAR, "https://medguide.example.com/"),
            (HOST_VAR, "127.0.0.1"),
            (PORT_VAR, "10000"),
            (DATASET_PATH_VAR, "/srv/medicines.tsv"),
            (LOG_FORMAT_VAR, "json"),
        ])
        .unwrap();

        assert_eq!(config.mode, DeliveryMode::Webhook);
        assert_eq!(
            config.webhook_url().as_deref(),
            Some("https://medguide.example.com/123:abc")
        );
        assert_eq!(config.listen_addr().to_string(), "127.0.0.1:10000");
        assert_eq!(config.dataset_path, PathBuf::from("/srv/medicines.tsv"));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_values() {
        let cases = [
            (BOT_MODE_VAR, "carrier-pigeon"),
            (PORT_VAR, "eighty"),
            (PORT_VAR, "70000"),
            (HOST_VAR, "not-an-ip"),
            (WEBHOOK_BASE_URL_VAR, "medguide.example.com"),
            (LOG_FORMAT_VAR, "xml"),
        ];

        for (variable, value) in cases {
            let err = config_from(&[(BOT_TOKEN_VAR, "123:abc"), (variable, value)]).unwrap_err();
            assert_eq!(
                err,
                ConfigError::InvalidValue {
                    variable,
                    value: value.to_string()
                }
            );
        }
    }
}
