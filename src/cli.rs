//! Command-line interface parsing for ghpeek
//!
//! Arguments fall back to environment variables, so a token can be supplied
//! through `GITHUB_TOKEN` without appearing in shell history.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::cache::JsonFileStore;
use crate::github::{DEFAULT_TIMEOUT, GITHUB_API_BASE};

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// The API URL is not an http(s) URL
    #[error("Invalid API URL: '{0}'. Expected an http:// or https:// URL")]
    InvalidApiUrl(String),

    /// A zero timeout would fail every request
    #[error("Invalid timeout: must be at least 1 second")]
    InvalidTimeout,

    /// No cache directory was given and none could be derived
    #[error("Could not determine a cache directory; pass --cache-dir")]
    NoCacheDir,
}

/// ghpeek - Look up GitHub users and their repositories, with a local cache
#[derive(Parser, Debug)]
#[command(name = "ghpeek")]
#[command(about = "Look up GitHub user profiles and repositories with a local cache")]
#[command(version)]
pub struct Cli {
    /// GitHub token sent as a bearer credential
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Directory holding users.json and repos.json
    #[arg(long, env = "GHPEEK_CACHE_DIR", value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Root URL of the GitHub REST API
    #[arg(long, env = "GHPEEK_API_URL", default_value = GITHUB_API_BASE, value_name = "URL")]
    pub api_url: String,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs(), value_name = "SECS")]
    pub timeout_secs: u64,

    /// Log cache decisions and requests to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Validated settings derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Bearer token, if a non-empty one was supplied
    pub token: Option<String>,
    /// Explicit cache directory; `None` means the platform default
    pub cache_dir: Option<PathBuf>,
    /// API root without a trailing slash
    pub api_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Whether debug logging is on
    pub verbose: bool,
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with normalized settings
    /// * `Err(CliError)` if the URL or timeout is invalid
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let api_url = cli.api_url.trim().trim_end_matches('/').to_string();
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(CliError::InvalidApiUrl(cli.api_url.clone()));
        }

        if cli.timeout_secs == 0 {
            return Err(CliError::InvalidTimeout);
        }

        let token = cli
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        Ok(StartupConfig {
            token,
            cache_dir: cli.cache_dir.clone(),
            api_url,
            timeout: Duration::from_secs(cli.timeout_secs),
            verbose: cli.verbose,
        })
    }

    /// Opens the persistence store at the configured or default location
    pub fn store(&self) -> Result<JsonFileStore, CliError> {
        match &self.cache_dir {
            Some(dir) => Ok(JsonFileStore::with_dir(dir.clone())),
            None => JsonFileStore::new().ok_or(CliError::NoCacheDir),
        }
    }
}
