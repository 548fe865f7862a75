//! Terminal rendering of the published post list.

use console::{Term, style};
use postfeed_core::{FeedConfig, Post};
use std::io::{Result, Write};

/// Renders the effective configuration.
pub fn render_config(config: &FeedConfig, full: bool) -> anyhow::Result<()> {
    let mut out = Term::stdout();
    if full {
        let toml = toml::to_string_pretty(config)?;
        write!(out, "{toml}")?;
    } else {
        writeln!(out, "Configuration:")?;
        writeln!(out, "  Endpoint: {}", config.source.endpoint)?;
        writeln!(out, "  Log filter: {}", config.logging.filter)?;
    }
    Ok(())
}

/// Renders posts in received order: title in bold, body dimmed beneath it.
pub fn write_list<W: Write>(out: &mut W, posts: &[Post]) -> Result<()> {
    if posts.is_empty() {
        return writeln!(out, "{}", style("No posts.").dim());
    }

    for post in posts {
        writeln!(out, "{}", style(&post.title).bold())?;
        for line in post.body.lines() {
            writeln!(out, "  {}", style(line).dim())?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Renders posts as a pretty-printed JSON array.
pub fn write_json<W: Write>(out: &mut W, posts: &[Post]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, posts)?;
    writeln!(out)
}
