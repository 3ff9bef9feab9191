//! Base config: Telegram connection and the local store.

use std::path::PathBuf;
use std::time::Duration;

use super::{parse_duration, ConfigError, Lookup};

const DEFAULT_TELEGRAM_TIMEOUT: &str = "60s";
const DEFAULT_DB_PATH: &str = "./bot.redb";
const DEFAULT_DB_TIMEOUT: &str = "1s";

/// Extra time the HTTP client allows on top of the long-poll timeout.
const HTTP_TIMEOUT_MARGIN: Duration = Duration::from_secs(10);

/// Base config: Telegram-related and store settings.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// TELEGRAM_TOKEN (or BOT_TOKEN)
    pub telegram_token: String,
    /// TELEGRAM_TIMEOUT: long-poll timeout
    pub telegram_timeout: Duration,
    /// TELEGRAM_API_URL
    pub telegram_api_url: Option<String>,
    /// TELEGRAM_DEBUG: verbose logging of the Telegram client
    pub telegram_debug: bool,
    /// DB_PATH
    pub db_path: PathBuf,
    /// DB_TIMEOUT: store close timeout
    pub db_timeout: Duration,
}

impl BaseConfig {
    /// Reads the base settings through `lookup`. `token` overrides TELEGRAM_TOKEN if provided.
    pub fn load(lookup: Lookup<'_>, token: Option<String>) -> Result<Self, ConfigError> {
        let telegram_token = token
            .filter(|t| !t.is_empty())
            .or_else(|| lookup("TELEGRAM_TOKEN"))
            .or_else(|| lookup("BOT_TOKEN"))
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::Missing("TELEGRAM_TOKEN"))?;

        let telegram_timeout = duration_var(lookup, "TELEGRAM_TIMEOUT", DEFAULT_TELEGRAM_TIMEOUT)?;
        let telegram_api_url = lookup("TELEGRAM_API_URL").filter(|u| !u.is_empty());
        let telegram_debug = match lookup("TELEGRAM_DEBUG") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                ConfigError::invalid("TELEGRAM_DEBUG", format!("'{raw}' is not a boolean"))
            })?,
            None => false,
        };

        let db_path = lookup("DB_PATH")
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_DB_PATH.to_string())
            .into();
        let db_timeout = duration_var(lookup, "DB_TIMEOUT", DEFAULT_DB_TIMEOUT)?;

        Ok(Self {
            telegram_token,
            telegram_timeout,
            telegram_api_url,
            telegram_debug,
            db_path,
            db_timeout,
        })
    }

    /// HTTP client timeout: one long-poll request plus a margin.
    pub fn http_timeout(&self) -> Duration {
        self.telegram_timeout + HTTP_TIMEOUT_MARGIN
    }

    /// How long shutdown waits for the poller to finish its in-flight request and confirm the last
    /// update offset. Independent of the reply drain timeout.
    pub fn polling_stop_timeout(&self) -> Duration {
        self.http_timeout()
    }

    /// Timeouts must be positive; the API URL, if set, must parse.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.telegram_timeout.is_zero() {
            return Err(ConfigError::invalid(
                "TELEGRAM_TIMEOUT",
                "should be greater than 0",
            ));
        }
        if self.db_timeout.is_zero() {
            return Err(ConfigError::invalid("DB_TIMEOUT", "should be greater than 0"));
        }
        if let Some(ref url_str) = self.telegram_api_url {
            reqwest::Url::parse(url_str)
                .map_err(|e| ConfigError::invalid("TELEGRAM_API_URL", e.to_string()))?;
        }
        Ok(())
    }
}

pub(super) fn duration_var(
    lookup: Lookup<'_>,
    name: &'static str,
    default: &str,
) -> Result<Duration, ConfigError> {
    let raw = lookup(name)
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string());
    parse_duration(&raw).map_err(|reason| ConfigError::invalid(name, reason))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
