//! Site configuration
//!
//! - Layered loading: built-in defaults, the optional `site.{toml,...}` file
//!   named by `SITE_CONFIG`, `SITE_*` environment variables, then `PORT`
//! - Listen address derivation from the loaded values
//! - [`AppState`], the immutable state shared by every connection

mod state;
mod types;

use std::net::SocketAddr;

use crate::error::StartupError;

// Re-export public types
pub use state::AppState;
pub use types::{Config, LoggingConfig, PerformanceConfig, ServerConfig, SiteConfig};

/// Config file used when `SITE_CONFIG` is not set (extension optional)
pub const DEFAULT_CONFIG_PATH: &str = "site";

/// Port used when neither the config file nor the environment sets one
pub const DEFAULT_PORT: u16 = 5000;

impl Config {
    /// Load configuration from the process environment.
    ///
    /// The file named by `SITE_CONFIG` (default `site.toml`) is optional;
    /// `PORT` overrides every other port source.
    pub fn load() -> Result<Self, StartupError> {
        let path = std::env::var("SITE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path, std::env::var("PORT").ok())
    }

    /// Load configuration from specified file path (without extension)
    /// An empty or blank `port_override` counts as unset.
    pub fn load_from(config_path: &str, port_override: Option<String>) -> Result<Self, StartupError> {
        let port_override = port_override.filter(|p| !p.trim().is_empty());
        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("site.root", "public")?
            .set_default("site.default_page", "index.html")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("SITE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_override_option("server.port", port_override)?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, StartupError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|source| StartupError::Address { addr, source })
    }
}
