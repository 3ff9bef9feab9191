//! Long polling: runs teloxide's polling listener on its own task and forwards converted updates over
//! a bounded channel, exposed to the dispatcher as a plain stream.

use std::time::Duration;

use dbot_core::Update;
use futures::{Stream, StreamExt};
use teloxide::stop::StopToken;
use teloxide::update_listeners::{AsUpdateStream, Polling, UpdateListener};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::adapters::TelegramUpdateWrapper;

const UPDATE_BUFFER: usize = 100;

/// Handle on a running polling task.
pub struct PollingHandle {
    stop: StopToken,
    task: JoinHandle<()>,
}

impl PollingHandle {
    /// Stops receiving updates. Waits up to `wait` for the listener to acknowledge the last offset,
    /// then abandons it.
    pub async fn stop(self, wait: Duration) {
        info!("Stopping receiving updates");
        self.stop.stop();
        let mut task = self.task;
        if tokio::time::timeout(wait, &mut task).await.is_err() {
            warn!(timeout = ?wait, "Polling did not stop in time, aborting");
            task.abort();
        }
    }
}

/// Starts long polling with the given server-side `timeout`. The returned stream ends once polling
/// stops.
pub fn spawn_polling(
    bot: teloxide::Bot,
    timeout: Duration,
) -> (impl Stream<Item = Update> + Send + 'static, PollingHandle) {
    let mut listener = Polling::builder(bot).timeout(timeout).build();
    let stop = listener.stop_token();
    let (tx, rx) = mpsc::channel(UPDATE_BUFFER);

    let task = tokio::spawn(async move {
        let mut updates = std::pin::pin!(listener.as_stream());
        while let Some(next) = updates.next().await {
            match next {
                Ok(update) => {
                    if tx.send(TelegramUpdateWrapper(&update).to_core()).await.is_err() {
                        debug!("Update receiver dropped");
                        break;
                    }
                }
                Err(e) => warn!(error = %e, "Error receiving updates"),
            }
        }
        debug!("Polling finished");
    });

    let stream = futures::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|update| (update, rx))
    });
    (stream, PollingHandle { stop, task })
}
