//! Observable post feed.
//!
//! [`PostFeed`] runs fetches on the tokio runtime and publishes each
//! successfully decoded list to a `watch` channel that renderers subscribe
//! to. Failed attempts are logged and leave the published list untouched;
//! cancelled attempts leave no trace at all.
#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        reason = "Allow for tests"
    )
)]

/// The feed and its observable list.
pub mod feed;
/// Handles returned for each fetch attempt.
pub mod handle;
/// Shared bookkeeping between the feed and its fetch tasks.
mod state;

pub use feed::PostFeed;
pub use handle::{FetchCanceller, FetchHandle, FetchOutcome};
