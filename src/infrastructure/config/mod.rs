//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;
use crate::application::services::car_commander::DEFAULT_PAGE_SIZE;
use crate::application::services::pagination::MAX_PAGE_SIZE;

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub insurance: InsuranceConfig,
    pub adapters: AdaptersConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    pub prefix: String,
}

/// Insurance/car module settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct InsuranceConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    /// Titles loaded into the store at startup, in id order
    #[serde(default)]
    pub seed: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AdaptersConfig {
    pub telegram: Option<TelegramConfig>,
    pub console: Option<ConsoleConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TelegramConfig {
    pub enabled: bool,
    pub token: Option<String>,
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_seconds: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConsoleConfig {
    pub enabled: bool,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_poll_timeout() -> i64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "insurance-bot".to_string(),
                prefix: "/".to_string(),
            },
            insurance: InsuranceConfig {
                default_page_size: DEFAULT_PAGE_SIZE,
                seed: ["Toyota", "Nissan", "Infinity"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            },
            adapters: AdaptersConfig {
                telegram: Some(TelegramConfig {
                    enabled: false,
                    token: None,
                    poll_timeout_seconds: default_poll_timeout(),
                }),
                console: Some(ConsoleConfig {
                    enabled: true,
                }),
            },
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    pub fn load_env() -> Self {
        // Load from environment variables
        let mut config = Config::default();

        if let Ok(token) = std::env::var("BOT_TOKEN") {
            if let Some(ref mut tg) = config.adapters.telegram {
                tg.token = Some(token);
                tg.enabled = true;
            }
        }

        if let Ok(prefix) = std::env::var("BOT_PREFIX") {
            config.bot.prefix = prefix;
        }

        if let Ok(raw) = std::env::var("INSURANCE_PAGE_SIZE") {
            match raw.parse::<usize>() {
                Ok(size) if (1..=MAX_PAGE_SIZE).contains(&size) => config.insurance.default_page_size = size,
                _ => tracing::warn!("Ignoring INSURANCE_PAGE_SIZE={:?}", raw),
            }
        }

        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.prefix.is_empty() {
            return Err(ConfigError::MissingField("bot.prefix".to_string()));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.insurance.default_page_size) {
            return Err(ConfigError::InvalidValue(format!(
                "insurance.default-page-size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        Ok(())
    }

    /// Telegram token, if the adapter is enabled and has one
    pub fn telegram_token(&self) -> Option<String> {
        self.adapters
            .telegram
            .as_ref()
            .filter(|t| t.enabled)
            .and_then(|t| t.token.clone())
    }

    /// Console adapter is on unless a `console` section turns it off
    pub fn console_enabled(&self) -> bool {
        self.adapters.console.as_ref().map_or(true, |c| c.enabled)
    }

    pub fn poll_timeout(&self) -> i64 {
        self.adapters
            .telegram
            .as_ref()
            .map(|t| t.poll_timeout_seconds)
            .unwrap_or_else(default_poll_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trips_through_yaml() {
        let yaml = Config::default().to_yaml().unwrap();
        assert!(yaml.contains("default-page-size: 3"));
        let config = Config::from_yaml(&yaml).unwrap();
        assert_eq!(config.insurance.seed, vec!["Toyota", "Nissan", "Infinity"]);
        assert_eq!(config.telegram_token(), None);
    }

    #[test]
    fn test_optional_fields_fall_back() {
        let yaml = r#"
bot:
  name: test-bot
  prefix: "/"
insurance: {}
adapters:
  telegram:
    enabled: true
    token: "123:abc"
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.insurance.default_page_size, 3);
        assert!(config.insurance.seed.is_empty());
        assert_eq!(config.telegram_token().as_deref(), Some("123:abc"));
        assert_eq!(config.poll_timeout(), 30);
        assert!(config.adapters.console.is_none());
        assert!(config.console_enabled());
    }

    #[test]
    fn test_console_can_be_switched_off() {
        let yaml = r#"
bot: { name: b, prefix: "/" }
insurance: {}
adapters:
  console: { enabled: false }
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert!(!config.console_enabled());
        assert_eq!(config.telegram_token(), None);
        assert!(Config::default().console_enabled());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let yaml = r#"
bot: { name: b, prefix: "/" }
insurance: { default-page-size: 0 }
adapters: {}
"#;
        assert!(matches!(Config::from_yaml(yaml), Err(ConfigError::InvalidValue(_))));

        let yaml = r#"
bot: { name: b, prefix: "/" }
insurance: { default-page-size: 101 }
adapters: {}
"#;
        assert!(matches!(Config::from_yaml(yaml), Err(ConfigError::InvalidValue(_))));

        let yaml = r#"
bot: { name: b, prefix: "" }
insurance: {}
adapters: {}
"#;
        assert!(matches!(Config::from_yaml(yaml), Err(ConfigError::MissingField(_))));
        assert!(matches!(Config::from_yaml("bot: ["), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_disabled_telegram_hides_token() {
        let mut config = Config::default();
        if let Some(tg) = config.adapters.telegram.as_mut() {
            tg.token = Some("123:abc".to_string());
        }
        assert_eq!(config.telegram_token(), None);
    }
}
