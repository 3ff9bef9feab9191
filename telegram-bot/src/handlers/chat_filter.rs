//! Middleware dropping messages the bot must not react to.

use async_trait::async_trait;
use dbot_core::{BotIdentity, Message, Middleware, Result};
use tracing::debug;

use crate::mention::{is_bot_mentioned, is_reply_to_bot};

/// Lets a message through only if it has text and, outside private chats, mentions the bot or
/// replies to one of its messages.
pub struct ChatFilter {
    identity: BotIdentity,
}

impl ChatFilter {
    pub fn new(identity: BotIdentity) -> Self {
        Self { identity }
    }
}

#[async_trait]
impl Middleware for ChatFilter {
    async fn before(&self, message: &Message) -> Result<bool> {
        let Some(text) = message.text.as_deref() else {
            debug!(chat_id = message.chat.id, message_id = message.id, "Ignoring message without text");
            return Ok(false);
        };

        if message.chat.is_private() {
            return Ok(true);
        }

        let addressed = is_bot_mentioned(text, &self.identity.username)
            || is_reply_to_bot(message, self.identity.id);
        if !addressed {
            debug!(
                chat_id = message.chat.id,
                message_id = message.id,
                "Ignoring group message not addressed to the bot"
            );
        }
        Ok(addressed)
    }
}
