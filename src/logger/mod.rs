//! Leveled logging for the server and the page behaviors
//!
//! Lines are plain text prefixed with their level; access lines use the
//! configured [`AccessLogFormat`]. Calls made before [`init`] go straight to
//! stdout/stderr at `info` level.

mod format;
pub mod writer;

pub use format::{AccessLogEntry, AccessLogFormat};

use crate::config::Config;
use crate::routing::Resolution;
use std::net::SocketAddr;
use std::str::FromStr;

/// Log verbosity, ordered from least to most verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" | "trace" => Ok(Self::Debug),
            other => Err(format!("unknown log level '{other}'")),
        }
    }
}

/// Initialize the logger with configuration
///
/// Should be called once at application startup. An unknown level falls
/// back to `info` with a warning.
pub fn init(config: &Config) -> std::io::Result<()> {
    let level = config.logging.level.parse().unwrap_or_else(|e| {
        eprintln!("[WARN] {e}, using info");
        LogLevel::Info
    });
    writer::init(
        level,
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

fn enabled(level: LogLevel) -> bool {
    writer::get().map_or(LogLevel::Info, writer::LogWriter::level) >= level
}

fn emit(stream: writer::Stream, line: &str) {
    match (writer::get(), stream) {
        (Some(w), _) => w.write(stream, line),
        (None, writer::Stream::Out) => println!("{line}"),
        (None, writer::Stream::Err) => eprintln!("{line}"),
    }
}

fn write_info(message: &str) {
    emit(writer::Stream::Out, message);
}

fn write_error(message: &str) {
    emit(writer::Stream::Err, message);
}

pub fn log_site_start(addr: &SocketAddr, config: &Config, root: &std::path::Path) {
    if !enabled(LogLevel::Info) {
        return;
    }
    write_info("======================================");
    write_info("Pak Builders website is running");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Serving static files from: {}", root.display()));
    write_info(&format!("Default page: {}", config.site.default_page));
    write_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    log_debug(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    log_error(&format!("Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    if enabled(LogLevel::Error) {
        write_error(&format!("[ERROR] {message}"));
    }
}

pub fn log_warning(message: &str) {
    if enabled(LogLevel::Warn) {
        write_error(&format!("[WARN] {message}"));
    }
}

pub fn log_info(message: &str) {
    if enabled(LogLevel::Info) {
        write_info(&format!("[INFO] {message}"));
    }
}

pub fn log_debug(message: &str) {
    if enabled(LogLevel::Debug) {
        write_info(&format!("[DEBUG] {message}"));
    }
}

/// Record how a request path was resolved
pub fn log_resolution(path: &str, resolution: &Resolution) {
    match resolution {
        Resolution::Fallback { requested, .. } => {
            log_debug(&format!("[Route] {requested} -> fallback page"));
        }
        Resolution::NotFound(err) => log_debug(&format!("[Route] {path} -> 404 ({err})")),
        other => {
            if let Some(file) = other.file() {
                log_debug(&format!(
                    "[Route] {path} -> {} {}",
                    other.kind(),
                    file.path.display()
                ));
            }
        }
    }
}

pub fn log_access(entry: &AccessLogEntry, format: &AccessLogFormat) {
    write_info(&entry.render(format));
}

/// A page behavior failed to initialize and was skipped
pub fn log_behavior_skipped(name: &str, reason: &impl std::fmt::Display) {
    log_warning(&format!("[Behavior] {name} disabled: {reason}"));
}

pub fn log_shutdown(active_connections: usize) {
    log_info(&format!(
        "Shutdown requested, no longer accepting connections ({active_connections} still open)"
    ));
}
