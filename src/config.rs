//! Centralized configuration management for lnmfetch

use std::path::PathBuf;
use std::time::Duration;
use anyhow::{Result, Context};

pub const DEFAULT_BASE_URL: &str = "https://www.navcen.uscg.gov";
pub const DEFAULT_RECENT_COUNT: usize = 2;
pub const DEFAULT_USER_AGENT: &str = concat!("lnmfetch/", env!("CARGO_PKG_VERSION"));

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Origin of the NAVCEN site, without a trailing path
    pub base_url: String,
    /// How many of the newest-looking links to keep
    pub recent_count: usize,
    /// Re-download and overwrite files that are already present
    pub clean: bool,
    /// Directory that is inventoried and written to
    pub download_dir: PathBuf,
    /// HTTP client configuration
    pub http: HttpConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            recent_count: DEFAULT_RECENT_COUNT,
            clean: false,
            download_dir: PathBuf::from("."),
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let defaults = Config::default();

        let base_url = std::env::var("LNMFETCH_BASE_URL").unwrap_or(defaults.base_url);

        let download_dir = std::env::var("LNMFETCH_DOWNLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.download_dir);

        let http = HttpConfig {
            timeout_seconds: parse_env_var("LNMFETCH_HTTP_TIMEOUT_SECONDS")?
                .unwrap_or(defaults.http.timeout_seconds),
            user_agent: std::env::var("LNMFETCH_USER_AGENT")
                .unwrap_or(defaults.http.user_agent),
        };

        Ok(Config {
            base_url,
            recent_count: parse_env_var("LNMFETCH_RECENT_COUNT")?.unwrap_or(defaults.recent_count),
            clean: parse_env_var("LNMFETCH_CLEAN")?.unwrap_or(defaults.clean),
            download_dir,
            http,
        })
    }

    /// Get HTTP timeout as Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("Base URL must not be empty"));
        }

        if self.recent_count == 0 {
            return Err(anyhow::anyhow!("Recent count must be at least 1"));
        }

        let metadata = std::fs::metadata(&self.download_dir).with_context(|| {
            format!("Cannot access download directory: {}", self.download_dir.display())
        })?;
        if !metadata.is_dir() {
            return Err(anyhow::anyhow!(
                "Download path is not a directory: {}",
                self.download_dir.display()
            ));
        }

        Ok(())
    }
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.trim().parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}
