//! Wraps teloxide::Bot and implements [`dbot_core::Bot`]. Production code sends messages via Telegram; tests substitute another Bot impl.

use async_trait::async_trait;
use dbot_core::{Bot as CoreBot, BotIdentity, Chat, DbotError, Result};
use teloxide::payloads::SendMessageSetters;
use teloxide::requests::Requester;
use teloxide::types::{ChatId, MessageId, ParseMode, ReplyParameters};

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn identity(&self) -> Result<BotIdentity> {
        let me = self
            .bot
            .get_me()
            .await
            .map_err(|e| DbotError::Connect(format!("unable to connect to Telegram: {e}")))?;
        Ok(BotIdentity {
            id: me.user.id.0 as i64,
            username: me.user.username.clone().unwrap_or_default(),
        })
    }

    async fn send_reply(
        &self,
        chat: &Chat,
        reply_to_message_id: Option<i32>,
        text: &str,
    ) -> Result<()> {
        #[allow(deprecated)]
        let mut request = self
            .bot
            .send_message(ChatId(chat.id), text.to_string())
            .parse_mode(ParseMode::Markdown);
        if let Some(id) = reply_to_message_id {
            request = request.reply_parameters(ReplyParameters::new(MessageId(id)));
        }
        request.await.map_err(|e| DbotError::Send(e.to_string()))?;
        Ok(())
    }
}
