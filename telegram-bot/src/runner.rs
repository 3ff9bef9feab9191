//! Process lifecycle: store, bot connection, dispatch loop and graceful shutdown.

use std::sync::Arc;

use anyhow::{Context, Result};
use storage::KvStore;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument};

use crate::components::{build_bot_components, build_dispatcher};
use crate::config::BotConfig;
use crate::telegram::spawn_polling;

/// Main entry: opens the store, serves updates until SIGINT/SIGTERM, then closes the store
/// (removing its file when `delete_db_on_exit` is set). Close errors are logged, not returned.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig, delete_db_on_exit: bool) -> Result<()> {
    info!(db_path = %config.db_path().display(), "Initializing bot");

    let store = Arc::new(
        KvStore::open(config.db_path(), config.base().db_timeout).context("unable to init DB")?,
    );

    let result = serve(&config, store.clone()).await;

    if let Err(e) = store.close(delete_db_on_exit).await {
        error!(error = %e, "Unable to close DB");
    }
    info!("Bot stopped");
    result
}

/// Connects the bot and runs the dispatch loop. Returns after shutdown has drained the replies.
async fn serve(config: &BotConfig, store: Arc<KvStore>) -> Result<()> {
    let components = build_bot_components(config).await?;
    let dispatcher = Arc::new(build_dispatcher(config, &components, store));
    let drain_timeout = config.messages.shutdown_drain_timeout;
    let polling_stop_timeout = config.base().polling_stop_timeout();

    let (updates, polling) =
        spawn_polling(components.teloxide_bot.clone(), config.base().telegram_timeout);
    let cancel = CancellationToken::new();

    let signals = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            match wait_for_shutdown().await {
                Ok(()) => cancel.cancel(),
                Err(e) => error!(error = %e, "Unable to listen for shutdown signals"),
            }
        }
    });

    info!(username = %components.identity.username, "Bot started successfully");
    let loop_result = tokio::spawn({
        let dispatcher = dispatcher.clone();
        let cancel = cancel.clone();
        async move { dispatcher.run(updates, cancel).await }
    })
    .await;

    signals.abort();
    polling.stop(polling_stop_timeout).await;
    dispatcher.shutdown(drain_timeout).await;

    loop_result.context("update loop panicked")
}

/// Waits for Ctrl+C or SIGTERM.
async fn wait_for_shutdown() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())?;
        tokio::select! {
            res = signal::ctrl_c() => {
                res?;
                info!("Received Ctrl+C, shutting down");
            }
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down");
            }
        }
    }

    #[cfg(not(unix))]
    {
        signal::ctrl_c().await?;
        info!("Received Ctrl+C, shutting down");
    }

    Ok(())
}

/// Opens the store, lists its keys and closes it again.
pub async fn list_keys(config: &BotConfig) -> Result<Vec<String>> {
    let store = KvStore::open(config.db_path(), config.base().db_timeout)
        .context("unable to init DB")?;
    let keys = store.keys().context("unable to list keys");
    if let Err(e) = store.close(false).await {
        error!(error = %e, "Unable to close DB");
    }
    keys
}
