//! Error types
//!
//! Nothing here is fatal once the server is accepting connections: resolution
//! errors become 404s or fallbacks, behavior errors disable a single behavior.

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort startup before the listener is running
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("invalid listen address '{addr}': {source}")]
    Address {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("asset root '{}' is not accessible: {source}", path.display())]
    AssetRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Outcomes of a failed file lookup during request resolution
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Extensioned path with no matching file (terminal 404)
    #[error("asset not found: {0}")]
    AssetNotFound(String),

    /// Extensionless path with no named page (recovered by the fallback page)
    #[error("page not found: {0}")]
    PageNotFound(String),

    /// The fallback page itself is absent
    #[error("default page missing: {}", .0.display())]
    DefaultPageMissing(PathBuf),

    /// Path canonicalizes outside the asset root
    #[error("path escapes asset root: {0}")]
    OutsideRoot(String),

    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reasons a page behavior could not initialize
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BehaviorError {
    #[error("expected element not found: {0}")]
    MissingElement(&'static str),
}
