//! # Telegram bot application
//!
//! Wires the handler chain, the Telegram adapters and the key-value store. Loads config from env and
//! runs the long-polling dispatch loop until a shutdown signal.

pub mod cli;
pub mod components;
pub mod config;
pub mod dispatcher;
pub mod handlers;
pub mod mention;
pub mod runner;
pub mod telegram;

pub use cli::{load_config, Cli, Commands};

pub use dbot_core::{
    init_tracing, Bot, BotIdentity, Chat, ChatKind, DbotError, Handler, HandlerError,
    HandlerResponse, Message, Middleware, ReplyTo, Result, ToCoreMessage, ToCoreUser, Update, User,
};
pub use handler_chain::HandlerChain;

pub use config::{BotConfig, ConfigError, ConfigWatcher};
pub use dispatcher::Dispatcher;
pub use mention::{is_bot_mentioned, is_reply_to_bot, parse_command, Trigger};
pub use runner::{list_keys, run_bot};

pub use components::{build_bot_components, build_dispatcher, BotComponents};
pub use handlers::{build_handler_chain, ChatFilter, ChatMessageHandler, CommandHandler};
pub use telegram::{
    spawn_polling, PollingHandle, TelegramBotAdapter, TelegramMessageWrapper, TelegramUpdateWrapper,
    TelegramUserWrapper,
};
