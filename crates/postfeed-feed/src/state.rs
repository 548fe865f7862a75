use postfeed_core::{IgnoreLock as _, Post, Result};
use std::sync::Mutex;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

use crate::FetchOutcome;

/// State shared by a feed and every fetch task it spawns.
pub(crate) struct FeedState {
    /// The observable list
    published: watch::Sender<Vec<Post>>,
    /// Bookkeeping for the attempt currently allowed to publish
    in_flight: Mutex<InFlight>,
}

/// Only the attempt whose generation matches may publish.
#[derive(Default)]
pub(crate) struct InFlight {
    pub(crate) generation: u64,
    pub(crate) abort: Option<AbortHandle>,
}

impl FeedState {
    pub(crate) fn new() -> Self {
        let (published, _receiver) = watch::channel(Vec::new());
        Self {
            published,
            in_flight: Mutex::new(InFlight::default()),
        }
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Vec<Post>> {
        self.published.subscribe()
    }

    pub(crate) fn snapshot(&self) -> Vec<Post> {
        self.published.borrow().clone()
    }

    pub(crate) fn in_flight(&self) -> &Mutex<InFlight> {
        &self.in_flight
    }

    pub(crate) fn is_fetching(&self) -> bool {
        self.in_flight
            .lock_ignore_poison()
            .abort
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Applies the result of attempt `generation`.
    ///
    /// The lock is held across publication so a concurrent cancel either
    /// lands first (nothing published) or finds nothing left to cancel.
    pub(crate) fn complete(&self, generation: u64, result: Result<Vec<Post>>) -> FetchOutcome {
        let mut in_flight = self.in_flight.lock_ignore_poison();
        if in_flight.generation != generation {
            debug!(generation, "Discarding result of cancelled fetch");
            return FetchOutcome::Cancelled;
        }
        in_flight.abort = None;

        match result {
            Ok(posts) => {
                let count = posts.len();
                let changed = self.published.send_if_modified(|current| {
                    if *current == posts {
                        false
                    } else {
                        *current = posts;
                        true
                    }
                });
                info!(count, changed, "Published posts");
                FetchOutcome::Published(count)
            }
            Err(error) => {
                warn!("Fetch failed, keeping previously published posts: {error}");
                FetchOutcome::Failed(error)
            }
        }
    }

    /// Cancels attempt `generation` if it is still the one in flight.
    pub(crate) fn cancel(&self, generation: u64) -> bool {
        let mut in_flight = self.in_flight.lock_ignore_poison();
        if in_flight.generation != generation {
            return false;
        }
        let Some(abort) = in_flight.abort.take() else {
            return false;
        };
        // A task that panicked never reached `complete`.
        if abort.is_finished() {
            return false;
        }
        abort.abort();
        in_flight.generation += 1;
        debug!(generation, "Fetch cancelled");
        true
    }

    /// Cancels whatever is in flight, if anything.
    pub(crate) fn cancel_current(&self) -> bool {
        let generation = self.in_flight.lock_ignore_poison().generation;
        self.cancel(generation)
    }
}
