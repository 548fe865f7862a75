//! Core types and traits for postfeed.
//!
//! This crate provides the `Post` record and its decode contract, the error
//! taxonomy, configuration, and the `PostSource` trait implemented by every
//! backend the feed can pull from.
#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        reason = "Allow for tests"
    )
)]

/// Configuration loading and defaults.
pub mod config;
/// Error types and result definitions.
pub mod error;
/// Lock helpers shared across crates.
pub mod sync;
/// Trait definitions for post sources.
pub mod traits;
/// The `Post` record and its decoder.
pub mod types;

pub use config::{DEFAULT_ENDPOINT, FeedConfig, LoggingConfig, SourceConfig};
pub use error::{Error, Result};
pub use sync::IgnoreLock;
pub use traits::PostSource;
pub use types::Post;
