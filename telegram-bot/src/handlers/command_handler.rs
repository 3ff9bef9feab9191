//! Answers the configured start and help triggers with canned texts.

use async_trait::async_trait;
use dbot_core::{Handler, HandlerResponse, Message, Result};
use tracing::{debug, instrument};

use crate::config::{CommandsConfig, MessagesConfig, StartReply};
use crate::mention::Trigger;

/// Replies to the start trigger with the greeting (or the help text, per [`StartReply`]) and to the
/// help trigger with the help text. Anything else continues down the chain.
pub struct CommandHandler {
    start: Trigger,
    help: Trigger,
    start_text: String,
    help_text: String,
    bot_username: String,
}

impl CommandHandler {
    pub fn new(commands: &CommandsConfig, messages: &MessagesConfig, bot_username: String) -> Self {
        let start_text = match commands.start_reply {
            StartReply::Hello => messages.hello.clone(),
            StartReply::Help => messages.help.clone(),
        };
        Self {
            start: Trigger::new(commands.start.clone(), commands.match_mode),
            help: Trigger::new(commands.help.clone(), commands.match_mode),
            start_text,
            help_text: messages.help.clone(),
            bot_username,
        }
    }
}

#[async_trait]
impl Handler for CommandHandler {
    #[instrument(skip_all, fields(chat_id = message.chat.id, user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(text) = message.text.as_deref() else {
            return Ok(HandlerResponse::Ignore);
        };

        if self.start.matches(text, &self.bot_username) {
            debug!(trigger = %self.start.pattern(), "Got start command");
            return Ok(HandlerResponse::Reply(self.start_text.clone()));
        }
        if self.help.matches(text, &self.bot_username) {
            debug!(trigger = %self.help.pattern(), "Got help command");
            return Ok(HandlerResponse::Reply(self.help_text.clone()));
        }
        Ok(HandlerResponse::Continue)
    }
}
