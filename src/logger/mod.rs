//! Logging facade.
//!
//! Thin typed helpers over the shared [`writer`], so call sites never
//! deal with targets or formatting directly. Every helper works before
//! `init` has run by falling back to the standard streams, which keeps
//! early startup errors visible.

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use std::net::SocketAddr;
use std::sync::OnceLock;

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Level {
    Error,
    Warn,
    Info,
    Debug,
}

impl Level {
    fn parse(name: &str) -> Self {
        match name {
            "error" => Self::Error,
            "warn" | "warning" => Self::Warn,
            "debug" => Self::Debug,
            _ => Self::Info,
        }
    }
}

static LEVEL: OnceLock<Level> = OnceLock::new();

fn level() -> Level {
    LEVEL.get().copied().unwrap_or(Level::Info)
}

/// Prepare log targets and verbosity from the configuration.
pub fn init(config: &Config) -> std::io::Result<()> {
    let _ = LEVEL.set(Level::parse(&config.logging.level));
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

fn write_info(line: &str) {
    match writer::get() {
        Some(writer) => writer.write_info(line),
        None => println!("{line}"),
    }
}

fn write_error(line: &str) {
    match writer::get() {
        Some(writer) => writer.write_error(line),
        None => eprintln!("{line}"),
    }
}

/// Startup banner, printed once the listener is bound.
pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("========================================");
    write_info("SPA asset server started");
    write_info(&format!("Listening on:  http://{addr}"));
    write_info(&format!(
        "Asset root:    {} (fallback: {})",
        config.spa.asset_root, config.spa.fallback_file
    ));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    write_info(&format!(
        "Access log:    {} ({} format)",
        if config.logging.access_log { "on" } else { "off" },
        config.logging.access_log_format
    ));
    write_info("========================================");
}

pub fn log_info(message: &str) {
    if level() >= Level::Info {
        write_info(message);
    }
}

pub fn log_warning(message: &str) {
    if level() >= Level::Warn {
        write_error(&format!("[WARN] {message}"));
    }
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

/// One line per completed request, in the configured format.
pub fn log_access(entry: &AccessLogEntry, format_name: &str) {
    let line = entry.format(format_name);
    match writer::get() {
        Some(writer) => writer.write_access(&line),
        None => println!("{line}"),
    }
}

pub fn log_shutdown_signal(signal: &str) {
    log_info(&format!("{signal} received, shutting down"));
}

/// Protocol errors while serving a connection. These are routine when
/// clients disconnect mid-request, so they log below error severity.
pub fn log_connection_error(error: &hyper::Error) {
    log_warning(&format!("Connection error: {error}"));
}
