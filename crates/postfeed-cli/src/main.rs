//! postfeed - fetch posts from a JSON endpoint and list them
#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        reason = "Allow for tests"
    )
)]

use anyhow::Result;
use clap::Parser as _;
use cli::{Cli, Commands};

mod cli;
mod handlers;
mod render;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = handlers::load_config(cli.config.as_deref())?;
    handlers::init_tracing(&config);

    match cli.command {
        Commands::Fetch { endpoint, json } => {
            handlers::handle_fetch(config, endpoint, json, handlers::interrupted()).await
        }
        Commands::Config { full } => handlers::handle_config(&config, full),
    }
}
