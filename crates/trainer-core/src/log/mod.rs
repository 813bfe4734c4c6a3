//! Leveled console log entries.
//!
//! Every outcome the user should see (settings loaded, save failed, training
//! started) is reported as a [`LogEntry`] through a [`LogSink`].  The sink is
//! the presentation surface: it decides colours and layout.  Code in this
//! workspace only emits level-tagged text.
//!
//! # Console log vs. `tracing` (for beginners)
//!
//! The application also uses the `tracing` crate, but for a different audience.
//! `tracing` output is diagnostic, goes to stderr, and is filtered with
//! `RUST_LOG`.  The console log is part of the user interface: it is always
//! shown and its wording is stable.

use std::fmt;

use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};

/// `strftime` pattern used when rendering entry timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Severity of a console entry.
///
/// The console renderer maps each level to a colour:
/// `Info` to purple, `Success` to green, `Error` to red.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Success => "success",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One timestamped line in the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Local wall-clock time at emission, truncated to whole seconds.
    pub timestamp: NaiveDateTime,
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    /// Creates an entry stamped with the current local time.
    pub fn now(level: LogLevel, message: impl Into<String>) -> Self {
        Self::at(Local::now().naive_local(), level, message)
    }

    /// Creates an entry with an explicit timestamp.
    pub fn at(timestamp: NaiveDateTime, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.trunc_subsecs(0),
            level,
            message: message.into(),
        }
    }

    /// The timestamp rendered with [`TIMESTAMP_FORMAT`].
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

impl fmt::Display for LogEntry {
    /// Renders `[2024-01-01 12:00:00] message`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.formatted_timestamp(), self.message)
    }
}

/// Append-only destination for console entries.
///
/// Implementors only need [`append`](LogSink::append) and
/// [`clear`](LogSink::clear); [`log`](LogSink::log) is the single entry point
/// callers use and stamps the entry at call time.
pub trait LogSink {
    /// Adds an already-stamped entry to the end of the console.
    fn append(&mut self, entry: LogEntry);

    /// Removes every entry from the console.
    fn clear(&mut self);

    fn log(&mut self, message: &str, level: LogLevel) {
        self.append(LogEntry::now(level, message));
    }

    fn info(&mut self, message: &str) {
        self.log(message, LogLevel::Info);
    }

    fn success(&mut self, message: &str) {
        self.log(message, LogLevel::Success);
    }

    fn error(&mut self, message: &str) {
        self.log(message, LogLevel::Error);
    }
}

impl<S: LogSink + ?Sized> LogSink for &mut S {
    fn append(&mut self, entry: LogEntry) {
        (**self).append(entry);
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}
