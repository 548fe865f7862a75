use core::result::Result as CoreResult;
use std::io::Error as IoError;

use serde_json::Error as SerdeJsonError;
use thiserror::Error;
use toml::de::Error as TomlError;

/// Result type for postfeed operations.
pub type Result<T> = CoreResult<T, Error>;

/// Errors that can occur while loading configuration or fetching posts.
#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced a usable response: unreachable host,
    /// connection reset, timeout, or a failure while reading the body.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a status outside `200..300`.
    #[error("Bad response: HTTP status {status}")]
    BadResponse {
        /// Status code returned by the server.
        status: u16,
    },

    /// The body was not a JSON array of well-formed posts.
    #[error("Decode error: {0}")]
    Decode(#[from] SerdeJsonError),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// TOML deserialization failed.
    #[error("TOML deserialization error: {0}")]
    Toml(#[from] TomlError),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A general error not covered by other variants.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Returns `true` for the three ways a single fetch attempt can fail.
    ///
    /// None of these are retried; the attempt is simply abandoned.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::BadResponse { .. } | Self::Decode(_)
        )
    }
}
