//! HTTP server
//!
//! - Reusable listener creation (`SO_REUSEADDR`, `SO_REUSEPORT`)
//! - Per-connection serving with keep-alive, timeout and a connection limit
//! - The accept loop and its bounded drain on shutdown
//! - Signal handling that requests shutdown

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the module is exposed as server_loop
#[path = "loop.rs"]
pub mod server_loop;

// Re-export commonly used items
pub use listener::create_reusable_listener;
pub use server_loop::{run, start_server_loop};
