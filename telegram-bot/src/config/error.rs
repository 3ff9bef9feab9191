//! Configuration errors. All of them are fatal at startup.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("empty config value '{0}'")]
    Missing(&'static str),

    #[error("invalid config value '{name}': {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("unable to load dotenv file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("unable to watch config file: {0}")]
    Watch(#[from] notify::Error),
}

impl ConfigError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            name,
            reason: reason.into(),
        }
    }
}
