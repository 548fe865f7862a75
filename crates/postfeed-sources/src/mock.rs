//! Mock source for testing feed behaviour.
//!
//! Serves scripted responses in order, enabling end-to-end tests of the
//! fetch-decode-publish path without a network.

use async_trait::async_trait;
use postfeed_core::{Error, IgnoreLock as _, Post, PostSource, Result};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Already decoded posts.
    Posts(Vec<Post>),
    /// A raw body, run through the regular decoder.
    Body(String),
    /// An HTTP status with an empty body.
    Status(u16),
    /// A transport failure with the given message.
    Transport(String),
}

impl MockResponse {
    /// Turns the scripted reply into what a real source would return.
    fn resolve(self) -> Result<Vec<Post>> {
        match self {
            Self::Posts(posts) => Ok(posts),
            Self::Body(body) => Post::decode_list(body.as_bytes()),
            // A success status with no body decodes like an empty payload would.
            Self::Status(status) if (200..300).contains(&status) => Post::decode_list(&[]),
            Self::Status(status) => Err(Error::BadResponse { status }),
            Self::Transport(message) => Err(Error::Transport(message)),
        }
    }
}

/// Source that replies from a queue of scripted responses.
///
/// Queued responses are consumed in order; once the queue is empty the
/// default response is repeated. With neither, the fetch fails with a
/// transport error.
#[derive(Clone, Default)]
pub struct MockPostSource {
    /// Responses served in order
    queue: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Served when the queue is empty
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Delay applied before every reply
    latency: Option<Duration>,
    /// Number of fetches started
    calls: Arc<Mutex<usize>>,
}

impl MockPostSource {
    /// Create an empty mock source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response.
    #[must_use]
    pub fn with_response(self, response: MockResponse) -> Self {
        self.queue.lock_ignore_poison().push_back(response);
        self
    }

    /// Set the response served once the queue is drained.
    #[must_use]
    pub fn with_default_response(self, response: MockResponse) -> Self {
        *self.default_response.lock_ignore_poison() = Some(response);
        self
    }

    /// Delay every reply by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Get the number of fetches started.
    #[must_use]
    pub fn call_count(&self) -> usize {
        *self.calls.lock_ignore_poison()
    }

    fn next_response(&self) -> Option<MockResponse> {
        let queued = self.queue.lock_ignore_poison().pop_front();
        queued.or_else(|| self.default_response.lock_ignore_poison().clone())
    }
}

#[async_trait]
impl PostSource for MockPostSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch_posts(&self) -> Result<Vec<Post>> {
        *self.calls.lock_ignore_poison() += 1;

        if let Some(latency) = self.latency {
            sleep(latency).await;
        }

        self.next_response()
            .ok_or_else(|| Error::Transport("mock source has no scripted response".to_owned()))?
            .resolve()
    }
}
