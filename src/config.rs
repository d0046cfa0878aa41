//! # Configuration
//!
//! Settings come from an optional `config/lab-inventory.toml`, overridden by `LAB_INVENTORY__*`
//! environment variables (`LAB_INVENTORY__ALERTS__MAX_ATTEMPTS=5`). Every key has a default, so
//! an empty environment yields a working system with email disabled.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "config/lab-inventory.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct InventoryConfig {
    /// Request channel capacity of each table actor.
    #[serde(default = "default_actor_buffer")]
    pub actor_buffer: usize,
    #[serde(default)]
    pub alerts: AlertConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlertConfig {
    #[serde(default = "default_queue_size")]
    pub queue_size: usize,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    #[serde(default = "default_email_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_email_from")]
    pub from: String,
    /// Without a key outbound email is disabled.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_email_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_report_limit")]
    pub limit: usize,
}

fn default_actor_buffer() -> usize {
    32
}

fn default_queue_size() -> usize {
    64
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    200
}

fn default_email_endpoint() -> String {
    "https://api.resend.com/emails".to_string()
}

fn default_email_from() -> String {
    "Lab Inventory <onboarding@resend.dev>".to_string()
}

fn default_email_timeout_secs() -> u64 {
    10
}

fn default_report_limit() -> usize {
    500
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            actor_buffer: default_actor_buffer(),
            alerts: AlertConfig::default(),
            email: EmailConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            queue_size: default_queue_size(),
            max_attempts: default_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

impl AlertConfig {
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            endpoint: default_email_endpoint(),
            from: default_email_from(),
            api_key: None,
            timeout_secs: default_email_timeout_secs(),
        }
    }
}

impl EmailConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            limit: default_report_limit(),
        }
    }
}

impl InventoryConfig {
    /// Load from [`DEFAULT_CONFIG_PATH`] and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load from `path` (optional, any format the `config` crate knows) and the environment.
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let mut loaded = Self::build(
            Config::builder()
                .add_source(File::with_name(path).required(false))
                .add_source(
                    Environment::with_prefix("LAB_INVENTORY")
                        .separator("__")
                        .try_parsing(true),
                ),
        )?;

        // The mail provider's conventional variable, for deployments that already set it.
        if loaded.email.api_key.is_none() {
            loaded.email.api_key = std::env::var("RESEND_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty());
        }
        Ok(loaded)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn empty_sources_yield_defaults() {
        let config = InventoryConfig::build(Config::builder()).unwrap();
        assert_eq!(config.actor_buffer, 32);
        assert_eq!(config.alerts.queue_size, 64);
        assert_eq!(config.alerts.max_attempts, 3);
        assert_eq!(config.alerts.retry_backoff(), Duration::from_millis(200));
        assert_eq!(config.email.endpoint, "https://api.resend.com/emails");
        assert_eq!(config.email.from, "Lab Inventory <onboarding@resend.dev>");
        assert_eq!(config.email.api_key, None);
        assert_eq!(config.email.timeout(), Duration::from_secs(10));
        assert_eq!(config.report.limit, 500);
    }

    #[test]
    fn file_values_override_defaults_per_key() {
        let toml = r#"
            actor_buffer = 8

            [alerts]
            max_attempts = 5

            [email]
            api_key = "re_test"
        "#;
        let builder = Config::builder().add_source(File::from_str(toml, FileFormat::Toml));
        let config = InventoryConfig::build(builder).unwrap();

        assert_eq!(config.actor_buffer, 8);
        assert_eq!(config.alerts.max_attempts, 5);
        assert_eq!(config.alerts.queue_size, 64);
        assert_eq!(config.email.api_key.as_deref(), Some("re_test"));
        assert_eq!(config.report.limit, 500);
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let config = InventoryConfig::load_from("config/does-not-exist.toml").unwrap();
        assert_eq!(config.report.limit, 500);
    }
}
