use async_trait::async_trait;
use postfeed_core::{DEFAULT_ENDPOINT, Error, FeedConfig, Post, PostSource, Result};
use reqwest::{Client, Url};
use tracing::debug;

/// Fetches posts with a plain `GET` against a JSON endpoint.
///
/// Uses the client's default timeouts and never retries.
#[derive(Debug, Clone)]
pub struct HttpPostSource {
    /// HTTP client for requests.
    client: Client,
    /// URL the posts are fetched from.
    endpoint: String,
}

impl HttpPostSource {
    /// Creates a source pointed at [`DEFAULT_ENDPOINT`].
    pub fn new() -> Self {
        Self {
            client: Client::default(),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
        }
    }

    /// Creates a source from the `[source]` section of the config.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the endpoint is not an absolute
    /// `http` or `https` URL.
    pub fn from_config(config: &FeedConfig) -> Result<Self> {
        validate_endpoint(&config.source.endpoint)?;
        Ok(Self::new().with_endpoint(config.source.endpoint.clone()))
    }

    /// Sets the endpoint to fetch from.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Returns the endpoint this source fetches from.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for HttpPostSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Checks that `endpoint` parses as an `http`/`https` URL.
fn validate_endpoint(endpoint: &str) -> Result<()> {
    let url = Url::parse(endpoint)
        .map_err(|err| Error::Config(format!("Invalid endpoint {endpoint:?}: {err}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(Error::Config(format!(
            "Unsupported endpoint scheme {other:?} in {endpoint:?}"
        ))),
    }
}

#[async_trait]
impl PostSource for HttpPostSource {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch_posts(&self) -> Result<Vec<Post>> {
        debug!(endpoint = %self.endpoint, "Requesting posts");

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|err| Error::Transport(format!("GET {} failed: {err}", self.endpoint)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::BadResponse {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| Error::Transport(format!("Reading response body failed: {err}")))?;
        debug!(bytes = body.len(), %status, "Received posts payload");

        let posts = Post::decode_list(&body)?;
        debug!(count = posts.len(), "Decoded posts");
        Ok(posts)
    }
}
