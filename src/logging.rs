//! Serialized console logger.
//!
//! A single logger collaborator with its own serialized sink, so no
//! mutable globals are exposed to workers: every worker holds an
//! `Arc<Logger>` and calls through it instead of touching shared state
//! directly.

use std::io::{self, Write};
use std::sync::Mutex;

use chrono::Local;

use crate::types::LogLevel;

/// A console logger guaranteeing one log line is written at a time, with
/// no interleaving within a line, since it is the only state shared
/// across workers.
pub struct Logger {
    verbose: bool,
    sink: Mutex<()>,
}

impl Logger {
    pub fn new(verbose: bool) -> Self {
        Logger {
            verbose,
            sink: Mutex::new(()),
        }
    }

    /// Log at INFO level, but only when verbose logging is enabled.
    pub fn verbose(&self, message: impl AsRef<str>) {
        if self.verbose {
            self.log(LogLevel::Info, message);
        }
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }

    fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        let _guard = self.sink.lock().unwrap_or_else(|e| e.into_inner());
        let now = Local::now().format("%d-%m-%Y %H:%M:%S");
        let mut stderr = io::stderr();
        let _ = writeln!(stderr, "[{now}] [{level}] {}", message.as_ref());
    }
}

impl Default for Logger {
    fn default() -> Self {
        Logger::new(false)
    }
}
