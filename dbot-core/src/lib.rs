//! # dbot-core
//!
//! Core types and traits for the example bot: [`Bot`], [`Handler`], [`Middleware`], update, message and
//! user types, the error taxonomy, and tracing initialization. Transport-agnostic; used by handler-chain
//! and telegram-bot.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{DbotError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{
    BotIdentity, Chat, ChatKind, Handler, HandlerResponse, Message, Middleware, ReplyTo, ToCoreMessage,
    ToCoreUser, Update, User,
};
