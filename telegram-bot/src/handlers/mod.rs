//! Handler implementations for the bot: the chat filter middleware, the command handler and the
//! terminal chat-message handler, plus the chain that wires them in that order.

mod chat_filter;
mod chat_message_handler;
mod command_handler;

use std::sync::Arc;

use dbot_core::BotIdentity;
use handler_chain::HandlerChain;

use crate::config::{CommandsConfig, MessagesConfig};

pub use chat_filter::ChatFilter;
pub use chat_message_handler::ChatMessageHandler;
pub use command_handler::CommandHandler;

/// Builds the chain (chat filter → commands → chat message).
pub fn build_handler_chain(
    commands: &CommandsConfig,
    messages: &MessagesConfig,
    identity: &BotIdentity,
) -> HandlerChain {
    HandlerChain::new()
        .add_middleware(Arc::new(ChatFilter::new(identity.clone())))
        .add_handler(Arc::new(CommandHandler::new(
            commands,
            messages,
            identity.username.clone(),
        )))
        .add_handler(Arc::new(ChatMessageHandler::new()))
}
