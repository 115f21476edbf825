//! Fetch configuration.
//!
//! Values are layered: built-in defaults, then an optional YAML file, then
//! command-line flags and environment variables (see [`crate::cli::Cli`]).
//!
//! ```yaml
//! request_url: "https://content.guardianapis.com/search?q=debates&api-key=test"
//! connect_timeout_ms: 1500
//! read_timeout_ms: 10000
//! use_system_proxy: true
//! ```

use crate::cli::Cli;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Default search endpoint queried when no URL is configured.
pub const DEFAULT_REQUEST_URL: &str =
    "https://content.guardianapis.com/search?q=debates&api-key=test";

/// Timeouts and endpoint for a fetch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchConfig {
    /// The URL of the first page to request.
    pub request_url: String,
    /// Upper bound on establishing the TCP/TLS connection.
    pub connect_timeout_ms: u64,
    /// Upper bound on each read from the connection.
    pub read_timeout_ms: u64,
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub use_system_proxy: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            request_url: DEFAULT_REQUEST_URL.to_string(),
            connect_timeout_ms: 1500,
            read_timeout_ms: 10_000,
            use_system_proxy: true,
        }
    }
}

impl FetchConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Parse a YAML document. Missing keys keep their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load a YAML config file.
    #[instrument(level = "info")]
    pub async fn load(path: &str) -> Result<Self, Box<dyn Error>> {
        let yaml = tokio::fs::read_to_string(path).await?;
        let config = Self::from_yaml(&yaml)?;
        info!(path, "Loaded configuration");
        Ok(config)
    }

    /// Apply command-line and environment overrides on top of `self`.
    pub fn with_overrides(mut self, args: &Cli) -> Self {
        if let Some(url) = &args.url {
            self.request_url = url.clone();
        }
        if let Some(ms) = args.connect_timeout_ms {
            self.connect_timeout_ms = ms;
        }
        if let Some(ms) = args.read_timeout_ms {
            self.read_timeout_ms = ms;
        }
        debug!(config = ?self, "Resolved fetch configuration");
        self
    }
}
