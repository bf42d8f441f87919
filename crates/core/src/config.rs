//! Shared configuration logic
//!
//! Validates the three secrets the service cannot run without. Validation
//! happens once, before any network call is made.

use crate::error::ConfigError;
use std::env;
use std::fmt;
use std::str::FromStr;
use tracing::error;

pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// Destination of outbound notifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatTarget {
    /// Numeric chat id (private chats and groups)
    Id(i64),
    /// Public channel username, including the leading `@`
    Channel(String),
}

impl FromStr for ChatTarget {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(id) = s.parse::<i64>() {
            return Ok(Self::Id(id));
        }

        if s.len() > 1 && s.starts_with('@') {
            return Ok(Self::Channel(s.to_string()));
        }

        Err(ConfigError::InvalidValue {
            name: TELEGRAM_CHAT_ID.to_string(),
            reason: format!("expected a numeric chat id or @channel, got '{s}'"),
        })
    }
}

impl fmt::Display for ChatTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Channel(name) => f.write_str(name),
        }
    }
}

/// Secrets required by every part of the service
#[derive(Clone)]
pub struct CoreConfig {
    /// OAuth token for the homework status API
    pub practicum_token: String,

    /// Telegram bot token
    pub telegram_token: String,

    /// Chat that receives status notifications
    pub telegram_chat_id: ChatTarget,
}

impl fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoreConfig")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

impl CoreConfig {
    /// Load required secrets from environment variables
    ///
    /// Reads the process environment only; loading a `.env` file is left to
    /// the binary's bootstrap.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Validate required secrets against an arbitrary key lookup
    ///
    /// Absent and blank values both count as missing. Every missing name is
    /// logged before the error is returned.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let practicum_token = read(PRACTICUM_TOKEN);
        let telegram_token = read(TELEGRAM_TOKEN);
        let telegram_chat_id = read(TELEGRAM_CHAT_ID);

        let (Some(practicum_token), Some(telegram_token), Some(telegram_chat_id)) =
            (&practicum_token, &telegram_token, &telegram_chat_id)
        else {
            let missing: Vec<String> = [
                (PRACTICUM_TOKEN, practicum_token.is_none()),
                (TELEGRAM_TOKEN, telegram_token.is_none()),
                (TELEGRAM_CHAT_ID, telegram_chat_id.is_none()),
            ]
            .into_iter()
            .filter(|(_, missing)| *missing)
            .map(|(name, _)| name.to_string())
            .collect();

            for name in &missing {
                error!("Missing required environment variable {}", name);
            }

            let err = ConfigError::MissingEnvVars(missing);
            error!("{}", err);
            return Err(err);
        };

        Ok(Self {
            practicum_token: practicum_token.clone(),
            telegram_token: telegram_token.clone(),
            telegram_chat_id: telegram_chat_id.parse()?,
        })
    }
}
