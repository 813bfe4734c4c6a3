//! In-memory console: the append-only log the presentation layer renders.
//!
//! [`ConsoleBuffer`] keeps every [`LogEntry`] in emission order.  A desktop
//! front end would repaint from [`entries`](ConsoleBuffer::entries); the
//! command-line driver prints the new lines after each action using a
//! [`cursor`](ConsoleBuffer::cursor), coloured by [`render`].

use colored::{ColoredString, Colorize};
use trainer_core::{LogEntry, LogLevel, LogSink};

/// Renders one entry as a terminal line, coloured by level.
///
/// Colour is dropped when `NO_COLOR` is set or stdout is not a terminal.
pub fn render(entry: &LogEntry) -> ColoredString {
    let line = entry.to_string();
    let line = line.as_str();
    match entry.level {
        LogLevel::Info => line.purple(),
        LogLevel::Success => line.green(),
        LogLevel::Error => line.red(),
    }
}

/// Append-only, clearable list of console entries.
#[derive(Debug, Default, Clone)]
pub struct ConsoleBuffer {
    entries: Vec<LogEntry>,
    /// Total entries ever appended, so cursors survive a clear.
    appended: usize,
}

impl ConsoleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries currently shown, oldest first.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries currently shown with the given level.
    pub fn with_level(&self, level: LogLevel) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |e| e.level == level)
    }

    /// Rendered lines, `[timestamp] message`.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    /// Position marker for [`since`](Self::since).
    pub fn cursor(&self) -> usize {
        self.appended
    }

    /// Entries appended after `cursor` that are still shown.
    ///
    /// If the console was cleared in between, only what was appended after
    /// the clear is returned.
    pub fn since(&self, cursor: usize) -> &[LogEntry] {
        let new = self.appended.saturating_sub(cursor).min(self.entries.len());
        &self.entries[self.entries.len() - new..]
    }
}

impl LogSink for ConsoleBuffer {
    fn append(&mut self, entry: LogEntry) {
        self.entries.push(entry);
        self.appended += 1;
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}
