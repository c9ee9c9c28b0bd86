// Application state module
// Immutable configuration plus the few runtime counters shared by connections

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

use super::types::Config;
use crate::error::StartupError;
use crate::logger::AccessLogFormat;
use crate::routing::ContentRouter;

/// Application state, shared read-only between requests
pub struct AppState {
    pub config: Config,
    pub router: ContentRouter,
    pub access_log_format: AccessLogFormat,
    /// Currently open client connections
    pub active_connections: Arc<AtomicUsize>,
    /// Raised once by the signal handler; the accept loop is its only waiter
    pub shutdown: Arc<Notify>,
    shutdown_requested: AtomicBool,
}

impl AppState {
    /// Build state from configuration, canonicalizing the asset root
    pub fn new(config: &Config) -> Result<Self, StartupError> {
        let router = ContentRouter::new(&config.site.root, &config.site.default_page).map_err(
            |source| StartupError::AssetRoot {
                path: config.site.root.clone().into(),
                source,
            },
        )?;

        Ok(Self {
            config: config.clone(),
            router,
            access_log_format: AccessLogFormat::from(config.logging.access_log_format.as_str()),
            active_connections: Arc::new(AtomicUsize::new(0)),
            shutdown: Arc::new(Notify::new()),
            shutdown_requested: AtomicBool::new(false),
        })
    }

    pub fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }

    pub fn request_shutdown(&self) {
        self.shutdown_requested.store(true, Ordering::SeqCst);
        self.shutdown.notify_one();
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown_requested.load(Ordering::SeqCst)
    }
}
