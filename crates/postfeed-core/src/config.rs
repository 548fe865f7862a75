//! Configuration for the post source and logging.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Endpoint serving the JSON array of posts.
pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/posts";

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "warn,postfeed_feed=info,postfeed_sources=info,postfeed_cli=info";

/// Complete postfeed configuration.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Where posts are fetched from
    pub source: SourceConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Post source configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// URL of the posts endpoint
    pub endpoint: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

impl FeedConfig {
    /// Get the default config directory path (`~/.postfeed`)
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_owned()))?;
        Ok(home.join(".postfeed"))
    }

    /// Get the default config file path (`~/.postfeed/config.toml`)
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from the default location, or defaults if there is no file.
    ///
    /// Nothing is written to disk.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed
    pub fn load_or_default() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from_file(&config_path)
        } else {
            debug!("No config at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load config from a specific file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;

        debug!(
            "Loaded config from {:?}: endpoint={}",
            path, config.source.endpoint
        );

        Ok(config)
    }

    /// Returns a copy with the source endpoint replaced.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.source.endpoint = endpoint.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(contents.as_bytes())
            .expect("Failed to write to temp file");
        file
    }

    #[test]
    fn test_default_config() {
        let config = FeedConfig::default();
        assert_eq!(config.source.endpoint, DEFAULT_ENDPOINT);
        assert!(config.logging.filter.contains("postfeed_feed=info"));
    }

    #[test]
    fn test_load_full_file() {
        let file = write_config(
            r#"
[source]
endpoint = "http://127.0.0.1:8080/posts"

[logging]
filter = "debug"
"#,
        );

        let config = FeedConfig::load_from_file(file.path()).expect("load config");
        assert_eq!(config.source.endpoint, "http://127.0.0.1:8080/posts");
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let file = write_config("[logging]\nfilter = \"trace\"\n");

        let config = FeedConfig::load_from_file(file.path()).expect("load config");
        assert_eq!(config.source.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let file = write_config("[source\nendpoint = ");
        let error = FeedConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(error, Error::Toml(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let error = FeedConfig::load_from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(error, Error::Io(_)));
    }

    #[test]
    fn test_with_endpoint_overrides_only_source() {
        let config = FeedConfig::default().with_endpoint("http://localhost/posts");
        assert_eq!(config.source.endpoint, "http://localhost/posts");
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_toml_roundtrip_keeps_values() {
        let config = FeedConfig::default().with_endpoint("http://example.test/posts");
        let text = toml::to_string_pretty(&config).expect("serialize");
        let parsed: FeedConfig = toml::from_str(&text).expect("parse");
        assert_eq!(parsed, config);
    }
}
