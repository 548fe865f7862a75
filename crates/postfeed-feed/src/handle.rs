use postfeed_core::Error;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::error;

use crate::state::FeedState;

/// How a fetch attempt ended.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The decoded list replaced the published one; carries its length.
    Published(usize),
    /// The attempt failed and nothing was published.
    Failed(Error),
    /// The attempt was cancelled or superseded before it could publish.
    Cancelled,
}

impl FetchOutcome {
    /// Returns `true` if the attempt published a list.
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published(_))
    }

    /// Returns the failure, if the attempt failed.
    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Failed(error) => Some(error),
            Self::Published(_) | Self::Cancelled => None,
        }
    }
}

/// Cancels one fetch attempt. Cheap to clone and safe to call from anywhere.
#[derive(Clone)]
pub struct FetchCanceller {
    state: Arc<FeedState>,
    generation: u64,
}

impl FetchCanceller {
    pub(crate) fn new(state: Arc<FeedState>, generation: u64) -> Self {
        Self { state, generation }
    }

    /// Cancels the attempt if it has not completed yet.
    ///
    /// Returns `true` if this call stopped the attempt. Once it returns
    /// `true` the attempt can no longer publish or report a failure.
    pub fn cancel(&self) -> bool {
        self.state.cancel(self.generation)
    }
}

/// Handle to a running fetch attempt.
///
/// Dropping the handle does not cancel the attempt; call
/// [`FetchHandle::cancel`] for that.
pub struct FetchHandle {
    task: JoinHandle<FetchOutcome>,
    canceller: FetchCanceller,
}

impl FetchHandle {
    pub(crate) fn new(task: JoinHandle<FetchOutcome>, canceller: FetchCanceller) -> Self {
        Self { task, canceller }
    }

    /// Cancels the attempt. See [`FetchCanceller::cancel`].
    pub fn cancel(&self) -> bool {
        self.canceller.cancel()
    }

    /// Returns a canceller that outlives [`FetchHandle::join`].
    pub fn canceller(&self) -> FetchCanceller {
        self.canceller.clone()
    }

    /// Returns `true` once the attempt has ended, however it ended.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the attempt to end.
    pub async fn join(self) -> FetchOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(err) if err.is_cancelled() => FetchOutcome::Cancelled,
            Err(err) => {
                error!("Fetch task panicked: {err}");
                FetchOutcome::Failed(Error::Other(format!("Fetch task panicked: {err}")))
            }
        }
    }
}
