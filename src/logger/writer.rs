//! Log output targets.
//!
//! Access lines go to stdout and diagnostics to stderr unless the
//! configuration redirects either stream to a file. The writer is a
//! process-wide singleton initialized once at startup.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

static LOG_WRITER: OnceLock<LogWriter> = OnceLock::new();

enum LogTarget {
    Stdout,
    Stderr,
    File(File),
}

pub struct LogWriter {
    access: Mutex<LogTarget>,
    error: Mutex<LogTarget>,
}

impl LogWriter {
    /// Write one access log line.
    pub fn write_access(&self, line: &str) {
        write_line(&self.access, line);
    }

    /// Write one informational line. Shares the access target so startup
    /// banners end up in the same stream as the request log.
    pub fn write_info(&self, line: &str) {
        write_line(&self.access, line);
    }

    /// Write one diagnostic line.
    pub fn write_error(&self, line: &str) {
        write_line(&self.error, line);
    }
}

fn write_line(target: &Mutex<LogTarget>, line: &str) {
    let Ok(mut target) = target.lock() else {
        return;
    };
    match &mut *target {
        LogTarget::Stdout => println!("{line}"),
        LogTarget::Stderr => eprintln!("{line}"),
        LogTarget::File(file) => {
            if writeln!(file, "{line}").is_err() {
                eprintln!("{line}");
            }
        }
    }
}

/// Install the process-wide writer. Later calls keep the first writer.
pub fn init(access_path: Option<&str>, error_path: Option<&str>) -> std::io::Result<()> {
    let access = match access_path {
        Some(path) => LogTarget::File(open_log_file(path)?),
        None => LogTarget::Stdout,
    };
    let error = match error_path {
        Some(path) => LogTarget::File(open_log_file(path)?),
        None => LogTarget::Stderr,
    };
    let _ = LOG_WRITER.set(LogWriter {
        access: Mutex::new(access),
        error: Mutex::new(error),
    });
    Ok(())
}

/// The installed writer, or `None` before `init` has run.
pub fn get() -> Option<&'static LogWriter> {
    LOG_WRITER.get()
}

fn open_log_file(path: &str) -> std::io::Result<File> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}
