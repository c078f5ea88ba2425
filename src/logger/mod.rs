//! Logger module
//!
//! Provides logging utilities for the HTTP server including:
//! - Server lifecycle logging
//! - Route table (debug mode only) and per-request access logging
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::{Config, LogMode};
use crate::routing::Route;
use chrono::Local;
use std::net::SocketAddr;

const LINE_TIME: &str = "%Y/%m/%d %H:%M:%S";

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

fn timestamped(message: &str) -> String {
    format!("{} {message}", Local::now().format(LINE_TIME))
}

/// Write to info/access log
fn write_info(message: &str) {
    let line = timestamped(message);
    match writer::get() {
        Some(w) => w.write_access(&line),
        None => println!("{line}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    let line = timestamped(message);
    match writer::get() {
        Some(w) => w.write_error(&line),
        None => eprintln!("{line}"),
    }
}

/// Write to access log specifically (entries carry their own timestamp)
fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info(&format!("Starting server on port {}...", addr.port()));
    if !config.logging.mode.is_verbose() {
        return;
    }
    write_info("======================================");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Log mode: {}", config.logging.mode));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(max) = config.performance.max_connections {
        write_info(&format!("Max connections: {max}"));
    }
    write_info(&format!(
        "Max body size: {} bytes",
        config.http.max_body_size
    ));
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================");
}

/// Print the route table; debug mode only
pub fn log_routes<'a>(routes: impl Iterator<Item = &'a Route>, mode: LogMode) {
    if !mode.is_verbose() {
        return;
    }
    for route in routes {
        write_info(&format!(
            "[ROUTE] {:<7}{:<25} --> {}",
            route.method.as_str(),
            route.full_path(),
            route.endpoint.name()
        ));
    }
}

/// Write one access line
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_info(message: &str) {
    write_info(message);
}

/// The listening socket could not be bound; the process exits right after
pub fn log_bind_failed(addr: &SocketAddr, err: &std::io::Error) {
    write_error(&bind_failed_line(addr, err));
}

fn bind_failed_line(addr: &SocketAddr, err: &std::io::Error) -> String {
    format!("[FATAL] Failed to start server on {addr}: {err}")
}

pub fn log_shutdown(signal: &str) {
    write_info(&format!("[SIGNAL] {signal} received, shutting down"));
}
