//! Bot configuration: BaseConfig (Telegram + store) + commands + reply texts, plus an optional
//! file watcher that reports changes of the dotenv file.

mod base;
mod bot_config;
mod duration;
mod error;
mod replies;
mod watcher;


pub use base::BaseConfig;
pub use bot_config::BotConfig;
pub use duration::parse_duration;
pub use error::ConfigError;
pub use replies::{CommandsConfig, MessagesConfig, StartReply, TriggerMatch};
pub use watcher::ConfigWatcher;

/// Source of config variables by name (the process environment in production).
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;
