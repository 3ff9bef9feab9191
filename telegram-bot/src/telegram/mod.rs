//! Telegram layer: adapters to core types, the Bot implementation, and the long-polling update source.

mod adapters;
mod bot_adapter;
mod polling;

pub use adapters::{TelegramMessageWrapper, TelegramUpdateWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use polling::{spawn_polling, PollingHandle};
