use async_trait::async_trait;

use crate::{Post, Result};

/// A backend that can produce the current list of posts.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Returns a short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Performs one complete fetch attempt: request, status check, decode.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Transport`] if no response arrived,
    /// [`crate::Error::BadResponse`] for a status outside `200..300`, and
    /// [`crate::Error::Decode`] if the body is not a well-formed post array.
    async fn fetch_posts(&self) -> Result<Vec<Post>>;
}
