//! Pak Builders site
//!
//! Two independent components:
//! - [`routing`] / [`handler`]: the fallback-routing static content server
//! - [`presentation`]: the page behaviors, driven by synthetic events over an
//!   in-memory document and an injectable host

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod presentation;
pub mod routing;
pub mod server;
