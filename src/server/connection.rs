// Connection handling module
// Admits a TCP connection against the configured limit and serves it over HTTP/1.1

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpStream;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// One unit of the active connection count, released on drop
struct ConnectionSlot(Arc<AtomicUsize>);

impl ConnectionSlot {
    /// Claim a slot, or `None` when `limit` connections are already open
    fn claim(counter: &Arc<AtomicUsize>, limit: Option<u64>) -> Option<Self> {
        let open = counter.fetch_add(1, Ordering::SeqCst);
        let slot = Self(Arc::clone(counter));
        match limit {
            Some(max) if open >= usize::try_from(max).unwrap_or(usize::MAX) => None,
            _ => Some(slot),
        }
    }
}

impl Drop for ConnectionSlot {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Admit a connection and serve it on the current `LocalSet`; over the limit it is dropped
pub fn accept_connection(stream: TcpStream, peer_addr: SocketAddr, state: &Arc<AppState>) {
    let limit = state.config.performance.max_connections;
    let Some(slot) = ConnectionSlot::claim(&state.active_connections, limit) else {
        logger::log_warning(&format!(
            "Connection limit {} reached, dropping {peer_addr}",
            limit.unwrap_or_default()
        ));
        return;
    };

    logger::log_connection_accepted(&peer_addr);
    serve(stream, peer_addr, Arc::clone(state), slot);
}

fn serve(stream: TcpStream, peer_addr: SocketAddr, state: Arc<AppState>, slot: ConnectionSlot) {
    tokio::task::spawn_local(async move {
        let _slot = slot;
        let deadline = state.config.performance.connection_timeout();

        let mut builder = http1::Builder::new();
        builder.keep_alive(state.config.performance.keep_alive_timeout > 0);

        let service_state = Arc::clone(&state);
        let conn = builder.serve_connection(
            TokioIo::new(stream),
            service_fn(move |req| {
                handler::handle_request(req, Arc::clone(&service_state), peer_addr)
            }),
        );

        match tokio::time::timeout(deadline, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => logger::log_warning(&format!(
                "Connection from {peer_addr} closed after {}s timeout",
                deadline.as_secs()
            )),
        }
    });
}
