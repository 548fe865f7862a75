//! Command handlers for CLI operations

use anyhow::{Context as _, Result, anyhow};
use console::Term;
use postfeed_core::{FeedConfig, PostSource};
use postfeed_feed::{FetchOutcome, PostFeed};
use postfeed_sources::HttpPostSource;
use std::future::pending;
use std::io::{self, Write};
use std::path::Path;
use std::pin::pin;
use std::sync::Arc;
use tokio::signal::ctrl_c;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

use crate::render::{render_config, write_json, write_list};

/// Load the config file given on the command line, or the default one.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed
pub fn load_config(path: Option<&Path>) -> Result<FeedConfig> {
    match path {
        Some(path) => FeedConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => FeedConfig::load_or_default().context("Failed to load config"),
    }
}

/// Install the global subscriber. Logs go to stderr; stdout carries output.
pub fn init_tracing(config: &FeedConfig) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

/// Fetch once and render whatever was published to stdout.
///
/// Resolving `cancel` cancels the fetch; a cancelled fetch renders nothing
/// and is not an error.
///
/// # Errors
/// Returns an error if the endpoint is invalid, the fetch fails, or output
/// cannot be written
pub async fn handle_fetch(
    config: FeedConfig,
    endpoint: Option<String>,
    json: bool,
    cancel: impl Future<Output = ()> + Send,
) -> Result<()> {
    let config = match endpoint {
        Some(endpoint) => config.with_endpoint(endpoint),
        None => config,
    };
    let source = HttpPostSource::from_config(&config)?;
    info!("Fetching posts from {}", source.endpoint());

    fetch_and_render(Arc::new(source), json, cancel, &mut Term::stdout()).await
}

/// Resolves on Ctrl-C. Never resolves if the signal cannot be listened for.
pub async fn interrupted() {
    if let Err(error) = ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {error}");
        pending::<()>().await;
    }
}

async fn fetch_and_render<W: Write + Send>(
    source: Arc<dyn PostSource>,
    json: bool,
    cancel: impl Future<Output = ()> + Send,
    out: &mut W,
) -> Result<()> {
    let feed = PostFeed::new(source);
    let handle = feed.fetch_posts();
    let canceller = handle.canceller();
    let mut join = pin!(handle.join());

    let finished = tokio::select! {
        outcome = &mut join => Some(outcome),
        () = cancel => {
            if canceller.cancel() {
                info!("Interrupted, fetch cancelled");
            }
            None
        }
    };
    let outcome = match finished {
        Some(outcome) => outcome,
        None => join.await,
    };

    match outcome {
        FetchOutcome::Published(count) => {
            let posts = feed.posts();
            if json {
                write_json(out, &posts)?;
            } else {
                write_list(out, &posts)?;
            }
            info!("Rendered {count} posts");
            Ok(())
        }
        FetchOutcome::Failed(error) => Err(anyhow!(error).context("Fetch failed")),
        FetchOutcome::Cancelled => Ok(()),
    }
}

/// Output current configuration. If `full` is true, prints full TOML.
///
/// # Errors
/// Returns an error if the configuration cannot be serialized or written
pub fn handle_config(config: &FeedConfig, full: bool) -> Result<()> {
    render_config(config, full)
}
