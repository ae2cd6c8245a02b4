use std::time::Duration;

use log::{info, warn};

use crate::feed::{FeedHandle, TokenSource};
use crate::view::CollectionViewState;

/// One dashboard screen: an exclusively owned collection view plus the live
/// feed that runs while the screen is active.
///
/// Activation starts the feed, deactivation cancels it. Once deactivated no
/// batch reaches the view, including batches the feed had already queued.
pub struct Screen {
    name: String,
    view: CollectionViewState,
    feed: Option<FeedHandle>,
}

impl Screen {
    pub fn new(name: impl Into<String>, view: CollectionViewState) -> Self {
        Self {
            name: name.into(),
            view,
            feed: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn view(&self) -> &CollectionViewState {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut CollectionViewState {
        &mut self.view
    }

    pub fn is_active(&self) -> bool {
        self.feed.as_ref().is_some_and(FeedHandle::is_active)
    }

    /// Start the live feed. Returns false if the screen was already active.
    pub fn activate<S: TokenSource>(&mut self, source: S, period: Duration) -> bool {
        if self.is_active() {
            warn!("Screen {} is already active, ignoring activation", self.name);
            return false;
        }

        info!("Activating screen {}", self.name);
        self.feed = Some(FeedHandle::spawn(source, period));
        true
    }

    /// Cancel the live feed without waiting for its task.
    pub fn deactivate(&mut self) {
        if let Some(mut feed) = self.feed.take() {
            info!("Deactivating screen {}", self.name);
            feed.cancel();
        }
    }

    /// Cancel the live feed and wait for its task to exit.
    pub async fn shutdown(&mut self) {
        if let Some(feed) = self.feed.take() {
            info!("Shutting down screen {}", self.name);
            feed.stop().await;
        }
    }

    /// Wait for the next feed batch and ingest it into the view.
    ///
    /// Returns the number of tokens received, or `None` when the screen is
    /// inactive or its feed has ended.
    pub async fn next_batch(&mut self) -> Option<usize> {
        let batch = match self.feed.as_mut() {
            // `recv` yields None once cancelled, even with batches queued.
            Some(feed) => feed.recv().await,
            None => return None,
        };

        match batch {
            // Only batches delivered before a deactivate reach the view.
            Some(batch) => {
                let received = batch.len();
                self.view.ingest(batch);
                Some(received)
            },
            // Feed cancelled or its task ended; drop the handle so the
            // screen reads as inactive.
            None => {
                self.feed = None;
                None
            },
        }
    }
}
