// Configuration types module
// Defines the immutable site configuration built once at startup

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub site: SiteConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
}

/// Listener configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Tokio worker threads (CPU cores when unset)
    #[serde(default)]
    pub workers: Option<usize>,
}

/// Asset layout configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Directory holding the HTML/CSS/JS assets
    pub root: String,
    /// Page served for `/` and for every unmatched extensionless path
    pub default_page: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Connection handling configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    #[serde(default)]
    pub max_connections: Option<u64>,
}

impl PerformanceConfig {
    /// Per-connection deadline: the larger of the read and write timeouts
    pub fn connection_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(std::cmp::max(self.read_timeout, self.write_timeout))
    }
}
