//! Shared fixtures for telegram-bot integration tests.

#![allow(dead_code)]

pub mod mock_bot;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use storage::KvStore;
use telegram_bot::config::{CommandsConfig, MessagesConfig, StartReply, TriggerMatch};
use telegram_bot::{Chat, ChatKind, Message, ReplyTo, Update, User};
use tempfile::TempDir;

pub const HELLO: &str = "Hello!";
pub const HELP: &str = "Use /start or /help";
pub const ERR_UNKNOWN: &str = "Something went wrong";

pub fn commands(match_mode: TriggerMatch, start_reply: StartReply) -> CommandsConfig {
    CommandsConfig {
        start: "start".to_string(),
        help: "help".to_string(),
        match_mode,
        start_reply,
    }
}

pub fn messages() -> MessagesConfig {
    MessagesConfig {
        hello: HELLO.to_string(),
        help: HELP.to_string(),
        err_unknown: ERR_UNKNOWN.to_string(),
        shutdown_drain_timeout: Duration::from_secs(1),
    }
}

/// Text message with id 10 from user 123.
pub fn message(kind: ChatKind, text: Option<&str>) -> Message {
    Message {
        id: 10,
        user: User {
            id: 123,
            username: Some("user".to_string()),
            first_name: Some("User".to_string()),
            last_name: None,
            is_bot: false,
        },
        chat: Chat { id: 456, kind },
        text: text.map(str::to_string),
        reply_to: None,
        created_at: Utc::now(),
    }
}

/// Group message replying to message 7 sent by `from_user_id`.
pub fn group_reply(text: &str, from_user_id: i64) -> Message {
    Message {
        reply_to: Some(ReplyTo {
            message_id: 7,
            from_user_id: Some(from_user_id),
        }),
        ..message(ChatKind::Group, Some(text))
    }
}

pub fn update(message: Message) -> Update {
    Update {
        id: 1,
        message: Some(message),
    }
}

pub fn temp_store() -> (TempDir, Arc<KvStore>) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = KvStore::open(dir.path().join("bot.redb"), Duration::from_secs(1))
        .expect("Failed to open store");
    (dir, Arc::new(store))
}
