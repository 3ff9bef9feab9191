//! Update dispatcher: consumes the update stream in arrival order, classifies each update through the
//! handler chain, and sends replies on tracked background tasks.

use std::sync::Arc;
use std::time::Duration;

use dbot_core::{Bot, HandlerResponse, Message, Update};
use futures::{Stream, StreamExt};
use handler_chain::HandlerChain;
use storage::KvStore;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info, instrument, warn};

/// Owns the bot connection, the handler chain and the store handle for the lifetime of the loop.
pub struct Dispatcher {
    bot: Arc<dyn Bot>,
    chain: HandlerChain,
    store: Arc<KvStore>,
    unknown_error_text: String,
    replies: TaskTracker,
}

impl Dispatcher {
    pub fn new(
        bot: Arc<dyn Bot>,
        chain: HandlerChain,
        store: Arc<KvStore>,
        unknown_error_text: impl Into<String>,
    ) -> Self {
        Self {
            bot,
            chain,
            store,
            unknown_error_text: unknown_error_text.into(),
            replies: TaskTracker::new(),
        }
    }

    /// Store available to handlers built on top of the dispatcher.
    pub fn store(&self) -> &Arc<KvStore> {
        &self.store
    }

    /// Processes updates one at a time until `cancel` fires or the stream ends.
    pub async fn run<S>(&self, updates: S, cancel: CancellationToken)
    where
        S: Stream<Item = Update>,
    {
        let mut updates = std::pin::pin!(updates);
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    warn!("Context closed - stopping listening to the updates");
                    break;
                }
                next = updates.next() => match next {
                    Some(update) => {
                        self.dispatch(update).await;
                    }
                    None => {
                        info!("Update stream stopped");
                        break;
                    }
                },
            }
        }
    }

    /// Classifies one update and, when the chain answers with a reply, sends it in the background.
    ///
    /// Updates without a message are ignored. A failing chain is answered with the unknown-error text.
    #[instrument(skip_all, fields(update_id = update.id))]
    pub async fn dispatch(&self, update: Update) -> HandlerResponse {
        let Some(message) = update.message else {
            debug!("Ignoring non-message update");
            return HandlerResponse::Ignore;
        };

        let response = match self.chain.handle(&message).await {
            Ok(response) => response,
            Err(e) => {
                error!(
                    error = %e,
                    chat_id = message.chat.id,
                    user_id = message.user.id,
                    "Handler chain failed"
                );
                HandlerResponse::Reply(self.unknown_error_text.clone())
            }
        };

        if let HandlerResponse::Reply(text) = &response {
            self.spawn_reply(message, text.clone());
        }
        response
    }

    fn spawn_reply(&self, message: Message, text: String) {
        let bot = self.bot.clone();
        self.replies.spawn(async move {
            debug!(chat_id = message.chat.id, msg_id = message.id, "Sending reply");
            if let Err(e) = bot.reply_to(&message, &text).await {
                error!(error = %e, chat_id = message.chat.id, "Unable to send the message");
            }
        });
    }

    /// Number of replies still being sent.
    pub fn pending_replies(&self) -> usize {
        self.replies.len()
    }

    /// Stops accepting replies and waits up to `drain_timeout` for those in flight.
    /// Returns false when some replies were still pending at the deadline; they keep running detached.
    pub async fn shutdown(&self, drain_timeout: Duration) -> bool {
        self.replies.close();
        let pending = self.replies.len();
        if pending > 0 {
            info!(pending, timeout = ?drain_timeout, "Waiting for in-flight replies");
        }
        let drained = tokio::time::timeout(drain_timeout, self.replies.wait())
            .await
            .is_ok();
        if !drained {
            warn!(pending = self.replies.len(), "Dropping in-flight replies");
        }
        drained
    }
}
