use dbot_core::{Chat, ChatKind, Message, ReplyTo, ToCoreMessage, ToCoreUser, Update, User};
use teloxide::types::UpdateKind;

/// Converts a Telegram user into a core user.
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
            is_bot: self.0.is_bot,
        }
    }
}

/// Converts a Telegram message into a core message.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        Message {
            id: self.0.id.0,
            user: self
                .0
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(User::anonymous),
            chat: Chat {
                id: self.0.chat.id.0,
                kind: self.chat_kind(),
            },
            text: self.0.text().map(str::to_string),
            reply_to: self.reply_to(),
            created_at: self.0.date,
        }
    }
}

impl<'a> TelegramMessageWrapper<'a> {
    fn chat_kind(&self) -> ChatKind {
        let chat = &self.0.chat;
        if chat.is_private() {
            ChatKind::Private
        } else if chat.is_supergroup() {
            ChatKind::Supergroup
        } else if chat.is_channel() {
            ChatKind::Channel
        } else {
            ChatKind::Group
        }
    }

    /// The replied-to message and its sender, used to detect replies to the bot.
    fn reply_to(&self) -> Option<ReplyTo> {
        self.0.reply_to_message().map(|replied| ReplyTo {
            message_id: replied.id.0,
            from_user_id: replied.from.as_ref().map(|u| u.id.0 as i64),
        })
    }
}

/// Converts a Telegram update into a core update; only plain messages carry a message.
pub struct TelegramUpdateWrapper<'a>(pub &'a teloxide::types::Update);

impl<'a> TelegramUpdateWrapper<'a> {
    pub fn to_core(&self) -> Update {
        let message = match &self.0.kind {
            UpdateKind::Message(msg) => Some(TelegramMessageWrapper(msg).to_core()),
            _ => None,
        };
        Update {
            id: i64::from(self.0.id.0),
            message,
        }
    }
}
