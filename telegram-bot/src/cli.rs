//! CLI parser and config loading.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::Level;

use crate::config::{BotConfig, ConfigError};

#[derive(Parser, Debug)]
#[command(name = "example-bot")]
#[command(about = "Example Telegram bot: canned replies to commands and mentions", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Dotenv file loaded into the environment before reading the config.
    #[arg(long, global = true)]
    pub env: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "INFO")]
    pub log: Level,

    /// Also append logs to this file.
    #[arg(long, global = true)]
    pub log_file: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override TELEGRAM_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
        /// Remove the store file after a clean close.
        #[arg(long)]
        delete_db_on_exit: bool,
        /// Watch the --env file and log when it changes. Ignored without --env.
        #[arg(long)]
        watch_config: bool,
    },
    /// List the keys currently held in the store.
    Keys,
}

/// Load BotConfig from `env_file` and the environment. If `token` is provided it overrides TELEGRAM_TOKEN.
pub fn load_config(env_file: Option<&Path>, token: Option<String>) -> Result<BotConfig, ConfigError> {
    BotConfig::load(env_file, token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_with_flags() {
        let cli = Cli::parse_from([
            "example-bot",
            "--env",
            "bot.env",
            "--log",
            "debug",
            "run",
            "--token",
            "abc",
            "--delete-db-on-exit",
        ]);

        assert_eq!(cli.env.as_deref(), Some(Path::new("bot.env")));
        assert_eq!(cli.log, Level::DEBUG);
        match cli.command {
            Commands::Run {
                token,
                delete_db_on_exit,
                watch_config,
            } => {
                assert_eq!(token.as_deref(), Some("abc"));
                assert!(delete_db_on_exit);
                assert!(!watch_config);
            }
            other => panic!("expected Run, got {other:?}"),
        }
    }

    #[test]
    fn test_log_level_defaults_to_info() {
        let cli = Cli::parse_from(["example-bot", "keys"]);

        assert_eq!(cli.log, Level::INFO);
        assert!(cli.env.is_none());
        assert!(matches!(cli.command, Commands::Keys));
    }
}
