//! Log writer module
//!
//! Routes info/access lines and error lines to stdout/stderr or append-mode
//! files. Installed once at startup; before that every line goes to the
//! standard streams.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

static LOG_WRITER: OnceLock<LogWriter> = OnceLock::new();

enum LogTarget {
    Stdout,
    Stderr,
    File(Mutex<File>),
}

impl LogTarget {
    fn open(path: Option<&str>, fallback: Self) -> io::Result<Self> {
        match path {
            Some(p) => Ok(Self::File(Mutex::new(open_log_file(p)?))),
            None => Ok(fallback),
        }
    }

    fn write_line(&self, message: &str) {
        match self {
            Self::Stdout => println!("{message}"),
            Self::Stderr => eprintln!("{message}"),
            Self::File(file) => {
                // a poisoned lock only means another writer panicked mid-line
                let mut f = file.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
                let _ = writeln!(f, "{message}");
            }
        }
    }
}

pub struct LogWriter {
    access: LogTarget,
    error: LogTarget,
}

impl LogWriter {
    fn new(access_log_file: Option<&str>, error_log_file: Option<&str>) -> io::Result<Self> {
        Ok(Self {
            access: LogTarget::open(access_log_file, LogTarget::Stdout)?,
            error: LogTarget::open(error_log_file, LogTarget::Stderr)?,
        })
    }
}

/// Open or create a log file for appending, creating parent directories
fn open_log_file(path: &str) -> io::Result<File> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global writer; fails if called twice or a file cannot be opened
pub fn init(access_log_file: Option<&str>, error_log_file: Option<&str>) -> io::Result<()> {
    let writer = LogWriter::new(access_log_file, error_log_file)?;
    LOG_WRITER.set(writer).map_err(|_| {
        io::Error::new(io::ErrorKind::AlreadyExists, "Log writer already initialized")
    })
}

/// Info and access lines
pub fn write_access(message: &str) {
    match LOG_WRITER.get() {
        Some(w) => w.access.write_line(message),
        None => println!("{message}"),
    }
}

/// Warning and error lines
pub fn write_error(message: &str) {
    match LOG_WRITER.get() {
        Some(w) => w.error.write_line(message),
        None => eprintln!("{message}"),
    }
}
