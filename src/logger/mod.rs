//! Logger module
//!
//! Logging utilities for the server:
//! - Server lifecycle logging
//! - Timestamped access logging
//! - Error and warning logging with optional file targets
//! - Suppression of transient client-disconnect noise
//!
//! Clients routinely abort mid-segment while scrubbing or switching
//! bitrates; the resulting resets would otherwise flood the error log.

pub mod writer;

use chrono::Local;
use hyper::{Method, Uri, Version};
use std::net::SocketAddr;

use crate::config::Settings;

/// Initialize the logger from settings
///
/// Should be called once at application startup.
pub fn init(settings: &Settings) -> std::io::Result<()> {
    writer::init(
        settings.logging.access_log_file.as_deref(),
        settings.logging.error_log_file.as_deref(),
    )
}

/// Whether a log message reports a peer-initiated disconnect.
///
/// These are expected during streaming playback and are dropped entirely.
pub fn is_transient_disconnect(message: &str) -> bool {
    message.contains("Connection reset by peer") || message.contains("Broken pipe")
}

/// Write to info/access log
fn write_info(message: &str) {
    if is_transient_disconnect(message) {
        return;
    }
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    if is_transient_disconnect(message) {
        return;
    }
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

/// Local time in access-log notation
fn timestamp() -> String {
    Local::now().format("%d/%b/%Y:%H:%M:%S").to_string()
}

pub fn log_server_start(addr: &SocketAddr, settings: &Settings, web_root: &std::path::Path) {
    write_info("======================================");
    write_info("HLS web server started");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!(
        "Access URL: http://localhost:{}/index.html",
        settings.server.port
    ));
    write_info(&format!("Web root: {}", web_root.display()));
    if let Some(workers) = settings.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = settings.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = settings.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================\n");
}

pub fn log_server_stop() {
    write_info("\nServer stopped");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info(&format!("[Connection] Accepted from: {peer_addr}"));
}

/// Log a connection-serving failure, dropping client-disconnect noise.
pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_request(method: &Method, uri: &Uri, version: Version) {
    write_info(&format!(
        "[{}] \"{method} {uri} {version:?}\"",
        timestamp()
    ));
}

pub fn log_response(bytes: usize) {
    write_info(&format!("[{}] Response: {bytes} bytes", timestamp()));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}
