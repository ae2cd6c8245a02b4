use std::time::Duration;

use log::{debug, error, info};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::TokenSource;
use crate::models::TokenRecord;

const FEED_CHANNEL_CAPACITY: usize = 16;

/// Handle to a running repeating feed task.
///
/// The task polls its source once per interval and forwards non-empty
/// batches. Cancelling the handle stops the task and suppresses every batch
/// still sitting in the channel: after [`cancel`](Self::cancel), `recv`
/// always returns `None`. Dropping the handle cancels it too.
pub struct FeedHandle {
    cancel_token: CancellationToken,
    task: Option<JoinHandle<()>>,
    receiver: mpsc::Receiver<Vec<TokenRecord>>,
}

impl FeedHandle {
    /// Start polling `source` every `period`. The first poll happens one
    /// full period after the call. Must be called inside a Tokio runtime.
    pub fn spawn<S: TokenSource>(source: S, period: Duration) -> Self {
        let (sender, receiver) = mpsc::channel(FEED_CHANNEL_CAPACITY);
        let cancel_token = CancellationToken::new();

        let task_token = cancel_token.clone();
        let task = tokio::spawn(async move {
            run_feed(source, period, sender, task_token).await;
        });

        Self {
            cancel_token,
            task: Some(task),
            receiver,
        }
    }

    /// Next detected batch, or `None` once cancelled or the task has ended.
    pub async fn recv(&mut self) -> Option<Vec<TokenRecord>> {
        // Checked before the channel so batches queued ahead of a cancel are
        // never handed out.
        if self.cancel_token.is_cancelled() {
            return None;
        }

        tokio::select! {
            biased;
            // Cancellation wins over a ready batch.
            _ = self.cancel_token.cancelled() => None,
            batch = self.receiver.recv() => batch,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.cancel_token.is_cancelled()
    }

    /// Stop immediately. Queued batches are discarded.
    pub fn cancel(&mut self) {
        self.cancel_token.cancel();
        self.receiver.close();
    }

    /// Cancel and wait for the task to finish.
    pub async fn stop(mut self) {
        self.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                error!("Live feed task ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

async fn run_feed<S: TokenSource>(
    mut source: S,
    period: Duration,
    sender: mpsc::Sender<Vec<TokenRecord>>,
    cancel_token: CancellationToken,
) {
    // First poll happens one full period after start, not immediately.
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!("Live feed started (every {}ms)", period.as_millis());

    loop {
        tokio::select! {
            biased;
            // Polled first so a due tick never runs after a cancel.
            _ = cancel_token.cancelled() => break,
            _ = ticker.tick() => {
                // A failed poll skips this tick only.
                let batch = match source.poll() {
                    Ok(batch) => batch,
                    Err(e) => {
                        error!("Token source poll failed: {:#}", e);
                        continue;
                    }
                };
                if batch.is_empty() {
                    continue;
                }

                debug!("Live feed delivering {} token(s)", batch.len());
                // A full channel must not hold the task past a cancel.
                tokio::select! {
                    biased;
                    _ = cancel_token.cancelled() => break,
                    sent = sender.send(batch) => {
                        // Receiver closed by `cancel` or dropped.
                        if sent.is_err() {
                            break;
                        }
                    }
                }
            }
        }
    }

    info!("Live feed stopped");
}
