//! BotConfig: BaseConfig + commands + messages. Use load() for env-based loading.

use std::env;
use std::path::Path;

use super::{BaseConfig, CommandsConfig, ConfigError, Lookup, MessagesConfig};

/// Full bot config, built once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub commands: CommandsConfig,
    pub messages: MessagesConfig,
}

impl BotConfig {
    /// Loads `env_file` into the process environment (existing variables win), then reads the config
    /// from the environment and validates it. `token` overrides TELEGRAM_TOKEN if provided.
    pub fn load(env_file: Option<&Path>, token: Option<String>) -> Result<Self, ConfigError> {
        if let Some(path) = env_file {
            dotenvy::from_path(path).map_err(|source| ConfigError::EnvFile {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Self::from_lookup(&|name| env::var(name).ok(), token)
    }

    /// Reads and validates the config through an arbitrary variable source.
    pub fn from_lookup(lookup: Lookup<'_>, token: Option<String>) -> Result<Self, ConfigError> {
        let config = Self {
            base: BaseConfig::load(lookup, token)?,
            commands: CommandsConfig::load(lookup)?,
            messages: MessagesConfig::load(lookup)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.base.validate()
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }

    pub fn telegram_token(&self) -> &str {
        &self.base.telegram_token
    }

    pub fn db_path(&self) -> &Path {
        &self.base.db_path
    }
}
