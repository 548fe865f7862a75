use postfeed_core::{IgnoreLock as _, Post, PostSource};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

use crate::handle::{FetchCanceller, FetchHandle};
use crate::state::FeedState;

/// Fetches posts from a source and publishes them to subscribers.
///
/// Each call to [`PostFeed::fetch_posts`] runs on a spawned task, so the
/// caller's context never blocks on the network. A successful attempt
/// replaces the published list wholesale; a failed one is logged and
/// changes nothing.
///
/// Only one attempt is live at a time: starting a fetch cancels the one in
/// flight, and a cancelled attempt can never publish. Dropping the feed
/// cancels its in-flight attempt as well.
pub struct PostFeed {
    /// Where posts come from
    source: Arc<dyn PostSource>,
    /// Published list and in-flight bookkeeping
    state: Arc<FeedState>,
}

impl PostFeed {
    /// Creates an empty feed. No request is issued.
    pub fn new(source: Arc<dyn PostSource>) -> Self {
        Self {
            source,
            state: Arc::new(FeedState::new()),
        }
    }

    /// Creates a feed and immediately starts its first fetch.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn launch(source: Arc<dyn PostSource>) -> (Self, FetchHandle) {
        let feed = Self::new(source);
        let handle = feed.fetch_posts();
        (feed, handle)
    }

    /// Starts a fetch, cancelling any attempt still in flight.
    ///
    /// The result is delivered to subscribers, not returned; the handle is
    /// for cancellation and for observing how the attempt ended.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn fetch_posts(&self) -> FetchHandle {
        let mut in_flight = self.state.in_flight().lock_ignore_poison();
        if let Some(previous) = in_flight.abort.take() {
            previous.abort();
            debug!(
                generation = in_flight.generation,
                "Cancelled superseded fetch"
            );
        }
        in_flight.generation += 1;
        let generation = in_flight.generation;

        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);
        let task = tokio::spawn(async move {
            let result = source.fetch_posts().await;
            state.complete(generation, result)
        });
        in_flight.abort = Some(task.abort_handle());
        drop(in_flight);

        debug!(source = self.source.name(), generation, "Started fetch");
        FetchHandle::new(
            task,
            FetchCanceller::new(Arc::clone(&self.state), generation),
        )
    }

    /// Subscribes to the published list.
    ///
    /// The receiver starts at the current list and is notified whenever a
    /// fetch publishes a list that differs from it.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Post>> {
        self.state.subscribe()
    }

    /// Returns a copy of the currently published list.
    pub fn posts(&self) -> Vec<Post> {
        self.state.snapshot()
    }

    /// Returns `true` while an attempt is in flight.
    pub fn is_fetching(&self) -> bool {
        self.state.is_fetching()
    }

    /// Cancels the in-flight attempt, if any.
    pub fn cancel(&self) -> bool {
        self.state.cancel_current()
    }
}

impl Drop for PostFeed {
    fn drop(&mut self) {
        if self.state.cancel_current() {
            debug!("Feed dropped with a fetch in flight");
        }
    }
}
