use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "postfeed")]
#[command(about = "Fetch posts from a JSON endpoint and list them", long_about = None)]
pub struct Cli {
    #[arg(
        short,
        long,
        global = true,
        help = "Config file (defaults to ~/.postfeed/config.toml)"
    )]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Fetch posts once and render them")]
    Fetch {
        #[arg(long, help = "Endpoint to fetch from (overrides config)")]
        endpoint: Option<String>,

        #[arg(long, help = "Print the posts as JSON")]
        json: bool,
    },

    #[command(about = "Show configuration")]
    Config {
        #[arg(long, help = "Print the full configuration as TOML")]
        full: bool,
    },
}
