//! Configuration for the poller process
//!
//! Loads configuration from environment variables

use anyhow::{Context, Result, ensure};
use homework_core::config::CoreConfig;
use std::env;
use std::ops::Deref;
use std::time::Duration;

/// Homework status endpoint
pub const ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Pause between poll cycles, whatever the previous cycle's outcome
pub const RETRY_PERIOD: Duration = Duration::from_secs(600);

/// Poller configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Required secrets
    pub core: CoreConfig,

    /// Status API endpoint
    pub endpoint: String,

    /// Seconds to sleep between cycles
    pub retry_period_secs: u64,

    /// `from_date` for the first request
    pub initial_from_date: i64,

    /// Relay per-cycle failures to the chat
    pub notify_on_errors: bool,
}

impl Config {
    /// Configuration with every optional setting at its default
    pub fn new(core: CoreConfig) -> Self {
        Self {
            core,
            endpoint: ENDPOINT.to_string(),
            retry_period_secs: RETRY_PERIOD.as_secs(),
            initial_from_date: 0,
            notify_on_errors: false,
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let core = CoreConfig::from_lookup(&lookup)?;
        let defaults = Self::new(core);

        let config = Self {
            endpoint: lookup("PRACTICUM_ENDPOINT").unwrap_or(defaults.endpoint),

            retry_period_secs: lookup("RETRY_PERIOD_SECS")
                .unwrap_or_else(|| defaults.retry_period_secs.to_string())
                .parse()
                .context("RETRY_PERIOD_SECS must be a valid integer")?,

            initial_from_date: lookup("INITIAL_FROM_DATE")
                .unwrap_or_else(|| defaults.initial_from_date.to_string())
                .parse()
                .context("INITIAL_FROM_DATE must be a valid integer")?,

            notify_on_errors: lookup("NOTIFY_ON_ERRORS")
                .unwrap_or_else(|| defaults.notify_on_errors.to_string())
                .parse()
                .context("NOTIFY_ON_ERRORS must be true or false")?,

            core: defaults.core,
        };

        ensure!(
            config.retry_period_secs > 0,
            "RETRY_PERIOD_SECS must be greater than zero"
        );

        Ok(config)
    }

    /// Sleep duration between poll cycles
    pub const fn retry_period(&self) -> Duration {
        Duration::from_secs(self.retry_period_secs)
    }
}

impl Deref for Config {
    type Target = CoreConfig;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homework_core::ChatTarget;
    use serial_test::serial;
    use std::collections::HashMap;

    fn test_core() -> CoreConfig {
        CoreConfig {
            practicum_token: "secret-practicum".to_string(),
            telegram_token: "secret-telegram".to_string(),
            telegram_chat_id: ChatTarget::Id(42),
        }
    }

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = [
            ("PRACTICUM_TOKEN", "secret-practicum"),
            ("TELEGRAM_TOKEN", "secret-telegram"),
            ("TELEGRAM_CHAT_ID", "42"),
        ]
        .iter()
        .chain(pairs)
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_config_has_defaults() {
        let config = Config::new(test_core());

        assert_eq!(config.endpoint, ENDPOINT);
        assert_eq!(config.retry_period_secs, 600);
        assert_eq!(config.retry_period(), RETRY_PERIOD);
        assert_eq!(config.initial_from_date, 0);
        assert!(!config.notify_on_errors);
    }

    #[test]
    fn test_config_deref() {
        let config = Config::new(test_core());

        assert_eq!(config.practicum_token, "secret-practicum");
        assert_eq!(config.telegram_chat_id, ChatTarget::Id(42));
    }

    #[test]
    fn test_config_lookup_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.endpoint, ENDPOINT);
        assert_eq!(config.retry_period(), RETRY_PERIOD);
        assert_eq!(config.initial_from_date, 0);
        assert!(!config.notify_on_errors);
        assert_eq!(config.telegram_chat_id, ChatTarget::Id(42));
    }

    #[test]
    fn test_config_lookup_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("PRACTICUM_ENDPOINT", "http://localhost:8080/statuses/"),
            ("RETRY_PERIOD_SECS", "30"),
            ("INITIAL_FROM_DATE", "1700000000"),
            ("NOTIFY_ON_ERRORS", "true"),
        ]))
        .unwrap();

        assert_eq!(config.endpoint, "http://localhost:8080/statuses/");
        assert_eq!(config.retry_period(), Duration::from_secs(30));
        assert_eq!(config.initial_from_date, 1_700_000_000);
        assert!(config.notify_on_errors);
    }

    #[test]
    fn test_config_rejects_zero_retry_period() {
        let result = Config::from_lookup(lookup_from(&[("RETRY_PERIOD_SECS", "0")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_rejects_malformed_numbers() {
        let err = Config::from_lookup(lookup_from(&[("INITIAL_FROM_DATE", "yesterday")]))
            .unwrap_err();
        assert!(err.to_string().contains("INITIAL_FROM_DATE"));

        let err = Config::from_lookup(lookup_from(&[("NOTIFY_ON_ERRORS", "maybe")]))
            .unwrap_err();
        assert!(err.to_string().contains("NOTIFY_ON_ERRORS"));
    }

    #[test]
    fn test_config_requires_secrets() {
        let err = Config::from_lookup(lookup_from(&[("PRACTICUM_TOKEN", "")])).unwrap_err();
        assert!(err.to_string().contains("PRACTICUM_TOKEN"));
        assert!(!err.to_string().contains("TELEGRAM_TOKEN"));
    }

    #[test]
    #[serial]
    fn test_config_from_env_reads_process_environment() {
        unsafe {
            env::set_var("PRACTICUM_TOKEN", "env_practicum");
            env::set_var("TELEGRAM_TOKEN", "env_telegram");
            env::set_var("TELEGRAM_CHAT_ID", "@homework");
            env::set_var("RETRY_PERIOD_SECS", "45");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.practicum_token, "env_practicum");
        assert_eq!(
            config.telegram_chat_id,
            ChatTarget::Channel("@homework".to_string())
        );
        assert_eq!(config.retry_period_secs, 45);

        unsafe {
            for name in [
                "PRACTICUM_TOKEN",
                "TELEGRAM_TOKEN",
                "TELEGRAM_CHAT_ID",
                "RETRY_PERIOD_SECS",
            ] {
                env::remove_var(name);
            }
        }
    }

    #[test]
    fn test_config_debug_hides_tokens() {
        let debug_str = format!("{:?}", Config::new(test_core()));

        assert!(debug_str.contains("retry_period_secs"));
        assert!(!debug_str.contains("secret-practicum"));
        assert!(!debug_str.contains("secret-telegram"));
    }
}
