//! Component factory: builds the Telegram client, the Bot adapter and the dispatcher from config.
//! Isolates assembly logic from the runner.

use std::sync::Arc;

use anyhow::{Context, Result};
use dbot_core::{Bot, BotIdentity};
use storage::KvStore;
use tracing::{debug, info, instrument};

use crate::config::BotConfig;
use crate::dispatcher::Dispatcher;
use crate::handlers::build_handler_chain;
use crate::telegram::TelegramBotAdapter;

/// Connected bot: raw teloxide client for polling, the core Bot adapter for replies, and the account.
pub struct BotComponents {
    pub teloxide_bot: teloxide::Bot,
    pub bot: Arc<dyn Bot>,
    pub identity: BotIdentity,
}

/// Builds the teloxide client (custom API URL, HTTP timeout above the long-poll timeout) and
/// authenticates via `get_me`.
#[instrument(skip(config))]
pub async fn build_bot_components(config: &BotConfig) -> Result<BotComponents> {
    let base = config.base();
    let client = teloxide::net::default_reqwest_settings()
        .timeout(base.http_timeout())
        .build()
        .context("unable to build HTTP client")?;

    let mut teloxide_bot = teloxide::Bot::with_client(config.telegram_token(), client);
    if let Some(ref url_str) = base.telegram_api_url {
        let url = reqwest::Url::parse(url_str).context("invalid TELEGRAM_API_URL")?;
        teloxide_bot = teloxide_bot.set_api_url(url);
    }
    if base.telegram_debug {
        debug!("Enabling debug mode for bot");
    }

    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let identity = bot.identity().await?;
    debug!(account = %identity.username, "Authorized successfully");

    Ok(BotComponents {
        teloxide_bot,
        bot,
        identity,
    })
}

/// Builds the dispatcher for a connected bot.
pub fn build_dispatcher(
    config: &BotConfig,
    components: &BotComponents,
    store: Arc<KvStore>,
) -> Dispatcher {
    let chain = build_handler_chain(&config.commands, &config.messages, &components.identity);
    info!(
        start = %config.commands.start,
        help = %config.commands.help,
        match_mode = ?config.commands.match_mode,
        "Handler chain ready"
    );
    Dispatcher::new(
        components.bot.clone(),
        chain,
        store,
        config.messages.err_unknown.clone(),
    )
}
