//! Terminal handler for accepted messages that are not commands. Logs them and sends nothing.

use async_trait::async_trait;
use dbot_core::{Handler, HandlerResponse, Message, Result};
use tracing::debug;

#[derive(Clone, Default)]
pub struct ChatMessageHandler;

impl ChatMessageHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Handler for ChatMessageHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        debug!(
            chat_id = message.chat.id,
            user_id = message.user.id,
            message = message.text.as_deref().unwrap_or_default(),
            "Parsing new chat message"
        );
        Ok(HandlerResponse::Continue)
    }
}
