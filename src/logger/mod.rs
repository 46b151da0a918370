//! Logger module
//!
//! Logging utilities for the server:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use chrono::Local;
use std::net::SocketAddr;

use crate::config::Config;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn write_info(message: &str) {
    writer::write_access(&format!("{} [INFO] {message}", timestamp()));
}

pub fn log_server_start(config: &Config, routes: usize) {
    write_info("======================================");
    write_info(&format!("plainroute {}", env!("CARGO_PKG_VERSION")));
    write_info(&format!("Registered routes: {routes}"));
    if config.static_files.enabled {
        write_info(&format!("Static files: {}", config.static_files.public_dir));
    } else {
        write_info("Static files: disabled");
    }
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================");
}

pub fn log_listening(addr: &SocketAddr) {
    write_info(&format!("listening on http://{addr}/"));
}

pub fn log_server_closed(addr: &SocketAddr) {
    write_info(&format!("Server on {addr} closed"));
}

pub fn log_connection_error(err: &impl std::fmt::Display) {
    log_error(&format!("Failed to serve connection: {err}"));
}

pub fn log_error(message: &str) {
    writer::write_error(&format!("{} [ERROR] {message}", timestamp()));
}

pub fn log_warning(message: &str) {
    writer::write_error(&format!("{} [WARN] {message}", timestamp()));
}

pub fn log_access(entry: &AccessLogEntry, format: &str) {
    writer::write_access(&entry.format(format));
}
