// Server loop module
// Accepts connections until shutdown, then lets open connections finish

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// Interval at which the drain phase re-checks open connections
const DRAIN_POLL: Duration = Duration::from_millis(50);

/// Run the accept loop on a fresh `LocalSet` until shutdown is requested
pub async fn run(listener: TcpListener, state: Arc<AppState>) -> std::io::Result<()> {
    let local = tokio::task::LocalSet::new();
    local.run_until(start_server_loop(listener, state)).await
}

/// Accept loop; must be polled inside a `LocalSet` (connections use `spawn_local`)
#[allow(clippy::ignored_unit_patterns)]
pub async fn start_server_loop(listener: TcpListener, state: Arc<AppState>) -> std::io::Result<()> {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => accept_connection(stream, peer_addr, &state),
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            _ = state.shutdown.notified() => {
                logger::log_shutdown(state.active_connections.load(Ordering::SeqCst));
                break;
            }
        }
    }

    drop(listener);
    drain_connections(&state).await;
    Ok(())
}

/// Wait for open connections, bounded by the connection timeout
async fn drain_connections(state: &AppState) {
    let deadline = tokio::time::Instant::now() + state.config.performance.connection_timeout();
    while state.active_connections.load(Ordering::SeqCst) > 0 {
        if tokio::time::Instant::now() >= deadline {
            logger::log_warning(&format!(
                "Drain deadline reached with {} connection(s) still open",
                state.active_connections.load(Ordering::SeqCst)
            ));
            return;
        }
        tokio::time::sleep(DRAIN_POLL).await;
    }
    logger::log_info("All connections closed");
}
