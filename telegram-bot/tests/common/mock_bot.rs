//! Mock implementation of [`telegram_bot::Bot`] for integration tests.
//!
//! Records every `send_reply` call so tests can assert on the replies without hitting Telegram.

use async_trait::async_trait;
use std::sync::Arc;
use telegram_bot::{Bot, BotIdentity, Chat, DbotError, Result};
use tokio::sync::mpsc;

pub const BOT_ID: i64 = 999;
pub const BOT_USERNAME: &str = "testbot";

/// One recorded call to `send_reply(chat, reply_to, text)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyRecord {
    pub chat_id: i64,
    pub reply_to: Option<i32>,
    pub text: String,
}

/// Mock Bot with a fixed identity that records replies (or fails every send when `failing`).
pub struct MockBot {
    reply_tx: mpsc::UnboundedSender<ReplyRecord>,
    failing: bool,
}

impl MockBot {
    /// Creates a MockBot and returns the receiver for reply records.
    pub fn with_receiver() -> (Arc<Self>, mpsc::UnboundedReceiver<ReplyRecord>) {
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        (
            Arc::new(Self {
                reply_tx,
                failing: false,
            }),
            reply_rx,
        )
    }

    /// MockBot whose sends always fail after being recorded.
    #[allow(dead_code)]
    pub fn failing() -> (Arc<Self>, mpsc::UnboundedReceiver<ReplyRecord>) {
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        (
            Arc::new(Self {
                reply_tx,
                failing: true,
            }),
            reply_rx,
        )
    }

    pub fn identity_value() -> BotIdentity {
        BotIdentity {
            id: BOT_ID,
            username: BOT_USERNAME.to_string(),
        }
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn identity(&self) -> Result<BotIdentity> {
        Ok(Self::identity_value())
    }

    async fn send_reply(&self, chat: &Chat, reply_to: Option<i32>, text: &str) -> Result<()> {
        let _ = self.reply_tx.send(ReplyRecord {
            chat_id: chat.id,
            reply_to,
            text: text.to_string(),
        });
        if self.failing {
            return Err(DbotError::Send("mock send failure".to_string()));
        }
        Ok(())
    }
}
