// Signal handling module
//
// Supported signals:
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)
// - SIGHUP:  Logged and ignored (configuration is read once at startup)

use std::sync::Arc;

use crate::config::AppState;
use crate::logger;

/// Start signal handlers (Unix only)
///
/// Spawns a background task that requests shutdown on the first
/// SIGTERM or SIGINT.
#[cfg(unix)]
pub fn start_signal_handler(state: Arc<AppState>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let registered = (
            signal(SignalKind::hangup()),
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        );
        let (mut sighup, mut sigterm, mut sigint) = match registered {
            (Ok(hup), Ok(term), Ok(int)) => (hup, term, int),
            _ => {
                logger::log_error("Failed to register signal handlers, use Ctrl+C fallback");
                if tokio::signal::ctrl_c().await.is_ok() {
                    state.request_shutdown();
                }
                return;
            }
        };

        logger::log_debug(&format!("[SIGNAL] Handlers registered for PID {}", std::process::id()));

        loop {
            tokio::select! {
                _ = sighup.recv() => {
                    logger::log_info("[SIGNAL] SIGHUP received; configuration is static, restart the process to reload");
                }

                _ = sigterm.recv() => {
                    logger::log_info("[SIGNAL] SIGTERM received, initiating graceful shutdown");
                    state.request_shutdown();
                    break;
                }

                _ = sigint.recv() => {
                    logger::log_info("[SIGNAL] SIGINT received (Ctrl+C), initiating graceful shutdown");
                    state.request_shutdown();
                    break;
                }
            }
        }
    });
}

/// Non-unix fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(state: Arc<AppState>) {
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            logger::log_info("[SIGNAL] Ctrl+C received, initiating graceful shutdown");
            state.request_shutdown();
        }
    });
}
