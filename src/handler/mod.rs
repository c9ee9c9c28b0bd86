//! Request handler module
//!
//! Turns an inbound HTTP request into a routing decision and a response.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
