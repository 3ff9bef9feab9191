//! Bot abstraction for identifying the bot account and sending replies.
//!
//! [`Bot`] is transport-agnostic; telegram-bot implements it via teloxide and tests substitute a mock.

use crate::error::Result;
use crate::types::{BotIdentity, Chat, Message};
use async_trait::async_trait;

/// Abstraction over the messaging platform connection.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Fetches the bot's own account (id and handle).
    async fn identity(&self) -> Result<BotIdentity>;

    /// Sends `text` to `chat`, threaded as a reply to `reply_to_message_id` when given.
    async fn send_reply(&self, chat: &Chat, reply_to_message_id: Option<i32>, text: &str)
        -> Result<()>;

    /// Replies to the given message in its chat. Messages without an id are answered unthreaded.
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        let reply_to = (message.id != 0).then_some(message.id);
        self.send_reply(&message.chat, reply_to, text).await
    }
}
