//! Post sources the feed can pull from.
#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        reason = "Allow for tests"
    )
)]

/// HTTP source backed by `reqwest`.
pub mod http;
/// Scripted in-memory source.
pub mod mock;

pub use http::HttpPostSource;
pub use mock::{MockPostSource, MockResponse};
