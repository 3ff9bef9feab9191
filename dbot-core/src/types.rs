//! Core types: update, user, chat, message, handler response, and the Handler / Middleware traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identity (id, username, names).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_bot: bool,
}

impl User {
    /// Placeholder sender for messages that carry no `from` (e.g. channel posts).
    pub fn anonymous() -> Self {
        Self {
            id: 0,
            username: None,
            first_name: None,
            last_name: None,
            is_bot: false,
        }
    }
}

/// Kind of chat the message arrived in. Only `Private` skips the mention / reply filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatKind {
    Private,
    Group,
    Supergroup,
    Channel,
}

/// Chat identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub kind: ChatKind,
}

impl Chat {
    pub fn is_private(&self) -> bool {
        self.kind == ChatKind::Private
    }
}

/// Reference to the message being replied to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyTo {
    pub message_id: i32,
    /// Sender of the replied-to message, when known.
    pub from_user_id: Option<i64>,
}

/// A single chat message with sender, chat, optional text and optional reply context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Platform message id; 0 when unknown (replies are then not threaded).
    pub id: i32,
    pub user: User,
    pub chat: Chat,
    pub text: Option<String>,
    pub reply_to: Option<ReplyTo>,
    pub created_at: DateTime<Utc>,
}

/// One inbound event from the messaging platform. Only message updates carry a [`Message`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    pub id: i64,
    pub message: Option<Message>,
}

/// Who the bot is on the platform; resolved once when connecting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotIdentity {
    pub id: i64,
    pub username: String,
}

/// Handler result for the chain. `Reply(text)` carries the response body for the dispatcher to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain and attach reply text.
    Reply(String),
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// Processes a message that passed all middleware. First Stop or Reply ends the handle phase.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, message: &Message) -> crate::error::Result<HandlerResponse>;
}

/// Runs around the handlers: `before` in order (false stops the chain), `after` in reverse order.
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }

    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}
