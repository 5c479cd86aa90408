use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::pagination::PaginationConfig;

pub const DEFAULT_ENDPOINT: &str = "https://graphqlzero.almansi.me/api";

/// Application configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GraphQL endpoint serving the albums collection
    pub endpoint: String,

    /// Page size for the first request and fallback for missing cursors
    pub limit: u32,

    /// Page requested on first load and refresh
    pub default_page: u32,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            limit: 10,
            default_page: 1,
            timeout_secs: 30,
        }
    }
}

impl Config {
    /// Initialize configuration from various sources
    pub async fn init() -> Result<Self> {
        debug!("Initializing configuration");

        let mut config = match Self::load_from_file().await? {
            Some(config) => config,
            None => Self::default(),
        };

        config.load_from_env();

        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(&mut self) {
        self.apply_env(|key| std::env::var(key).ok());
    }

    fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup("ALBUM_FEED_ENDPOINT") {
            self.endpoint = endpoint;
        }

        if let Some(limit) = lookup("ALBUM_FEED_LIMIT").and_then(|v| v.parse().ok()) {
            self.limit = limit;
        }

        if let Some(page) = lookup("ALBUM_FEED_DEFAULT_PAGE").and_then(|v| v.parse().ok()) {
            self.default_page = page;
        }

        if let Some(timeout) = lookup("ALBUM_FEED_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.timeout_secs = timeout;
        }
    }

    /// Load configuration from album-feed.json files
    pub async fn load_from_file() -> Result<Option<Self>> {
        // 1. ./.album-feed.json
        // 2. ./album-feed.json
        // 3. $CONFIG_DIR/album-feed/album-feed.json
        let mut config_paths = vec![
            PathBuf::from("./.album-feed.json"),
            PathBuf::from("./album-feed.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            config_paths.push(config_dir.join("album-feed").join("album-feed.json"));
        }

        for path in config_paths {
            if path.exists() {
                return Self::load_from_path(&path).await.map(Some);
            }
        }

        Ok(None)
    }

    pub async fn load_from_path(path: &Path) -> Result<Self> {
        debug!("Loading configuration from: {}", path.display());
        let content = tokio::fs::read_to_string(path).await?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid configuration in {}: {}", path.display(), e))?;
        Ok(config)
    }

    /// Apply command-line overrides
    pub fn with_overrides(
        mut self,
        endpoint: Option<String>,
        limit: Option<u32>,
        default_page: Option<u32>,
    ) -> Self {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        if let Some(limit) = limit {
            self.limit = limit;
        }
        if let Some(page) = default_page {
            self.default_page = page;
        }
        self
    }

    pub fn pagination(&self) -> PaginationConfig {
        PaginationConfig::new(self.limit, self.default_page)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(anyhow::anyhow!("Endpoint is required"));
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "Endpoint must be an http(s) URL, got {}",
                self.endpoint
            ));
        }

        if self.limit == 0 {
            return Err(anyhow::anyhow!("limit must be greater than 0"));
        }

        if self.default_page == 0 {
            return Err(anyhow::anyhow!("default_page must be greater than 0"));
        }

        if self.timeout_secs == 0 {
            return Err(anyhow::anyhow!("timeout_secs must be greater than 0"));
        }

        Ok(())
    }
}
