//! Pure functions deciding whether a message is addressed to the bot and which command it carries.
//!
//! Used by the chat filter (mention / reply-to-bot in groups) and the command handler (trigger matching).

use dbot_core::Message;

use crate::config::TriggerMatch;

/// Returns true if `text` contains a @mention of the given bot username. Usernames compare
/// ASCII-case-insensitively, as Telegram treats them.
pub fn is_bot_mentioned(text: &str, bot_username: &str) -> bool {
    if bot_username.is_empty() {
        return false;
    }
    let mention = format!("@{}", bot_username.to_ascii_lowercase());
    text.to_ascii_lowercase().contains(&mention)
}

/// Returns true if `message` replies to a message sent by the bot account `bot_id`.
pub fn is_reply_to_bot(message: &Message, bot_id: i64) -> bool {
    message
        .reply_to
        .as_ref()
        .and_then(|reply| reply.from_user_id)
        .is_some_and(|from| from == bot_id)
}

/// Splits a leading `/command[@bot]` token into the command name and the optional addressee.
/// Returns `None` when the text does not start with `/`.
pub fn parse_command(text: &str) -> Option<(&str, Option<&str>)> {
    let token = text.strip_prefix('/')?.split_whitespace().next().unwrap_or("");
    match token.split_once('@') {
        Some((command, addressee)) => Some((command, Some(addressee))),
        None => Some((token, None)),
    }
}

/// A configured command trigger (e.g. `start`) and how message text is matched against it.
#[derive(Debug, Clone)]
pub struct Trigger {
    pattern: String,
    mode: TriggerMatch,
}

impl Trigger {
    /// A leading `/` in `pattern` is ignored in command mode, so `start` and `/start` are the same trigger.
    pub fn new(pattern: impl Into<String>, mode: TriggerMatch) -> Self {
        Self {
            pattern: pattern.into(),
            mode,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Case-insensitive match of `text` against the trigger.
    ///
    /// - `Command`: the leading `/command` equals the trigger; `/command@other_bot` does not match.
    /// - `Prefix`: the text starts with the trigger.
    pub fn matches(&self, text: &str, bot_username: &str) -> bool {
        match self.mode {
            TriggerMatch::Command => {
                let Some((command, addressee)) = parse_command(text) else {
                    return false;
                };
                let wanted = self.pattern.strip_prefix('/').unwrap_or(&self.pattern);
                let for_us = addressee.map_or(true, |to| to.eq_ignore_ascii_case(bot_username));
                for_us && command.eq_ignore_ascii_case(wanted)
            }
            TriggerMatch::Prefix => text
                .get(..self.pattern.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(&self.pattern)),
        }
    }
}
