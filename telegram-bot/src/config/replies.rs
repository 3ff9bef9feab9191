//! Command triggers and canned reply texts.

use std::str::FromStr;
use std::time::Duration;

use super::base::duration_var;
use super::{ConfigError, Lookup};

const DEFAULT_SHUTDOWN_DRAIN_TIMEOUT: &str = "5s";

/// How a trigger string is compared against the message text. Both are case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerMatch {
    /// Leading `/command` (optionally `/command@bot`) equals the trigger; a leading `/` on the trigger is optional.
    #[default]
    Command,
    /// Message text starts with the trigger.
    Prefix,
}

impl FromStr for TriggerMatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "command" => Ok(TriggerMatch::Command),
            "prefix" => Ok(TriggerMatch::Prefix),
            other => Err(format!("expected 'command' or 'prefix', got '{other}'")),
        }
    }
}

/// What the start trigger answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartReply {
    /// The hello greeting.
    #[default]
    Hello,
    /// The same text as the help trigger.
    Help,
}

impl FromStr for StartReply {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hello" => Ok(StartReply::Hello),
            "help" => Ok(StartReply::Help),
            other => Err(format!("expected 'hello' or 'help', got '{other}'")),
        }
    }
}

/// CMD_* settings.
#[derive(Debug, Clone)]
pub struct CommandsConfig {
    pub start: String,
    pub help: String,
    pub match_mode: TriggerMatch,
    pub start_reply: StartReply,
}

/// MSG_* settings plus how long shutdown waits for replies still being sent.
#[derive(Debug, Clone)]
pub struct MessagesConfig {
    pub hello: String,
    pub help: String,
    pub err_unknown: String,
    pub shutdown_drain_timeout: Duration,
}

impl CommandsConfig {
    pub fn load(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            start: required(lookup, "CMD_START")?,
            help: required(lookup, "CMD_HELP")?,
            match_mode: parsed(lookup, "CMD_MATCH")?,
            start_reply: parsed(lookup, "CMD_START_REPLY")?,
        })
    }
}

impl MessagesConfig {
    pub fn load(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            hello: required(lookup, "MSG_HELLO")?,
            help: required(lookup, "MSG_HELP")?,
            err_unknown: required(lookup, "MSG_ERR_UNKNOWN")?,
            shutdown_drain_timeout: duration_var(
                lookup,
                "SHUTDOWN_DRAIN_TIMEOUT",
                DEFAULT_SHUTDOWN_DRAIN_TIMEOUT,
            )?,
        })
    }
}

fn required(lookup: Lookup<'_>, name: &'static str) -> Result<String, ConfigError> {
    lookup(name)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn parsed<T>(lookup: Lookup<'_>, name: &'static str) -> Result<T, ConfigError>
where
    T: FromStr<Err = String> + Default,
{
    match lookup(name).filter(|v| !v.is_empty()) {
        Some(raw) => raw
            .parse()
            .map_err(|reason: String| ConfigError::invalid(name, reason)),
        None => Ok(T::default()),
    }
}
