//! In-memory logger that records lines for later inspection.
use std::sync::Mutex;

use super::types::Log;

/// Severity tag attached to each buffered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Stage header.
    Stage,
    /// Informational line.
    Info,
    /// Debug line.
    Debug,
    /// Warning line.
    Warn,
    /// Error line.
    Error,
    /// Dry-run action line.
    DryRun,
    /// Entry left alone.
    Skip,
}

/// A single buffered log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Severity tag.
    pub level: LogLevel,
    /// Message text.
    pub message: String,
}

/// Implement the display methods of [`Log`] by pushing each message into
/// `self.entries` tagged with the matching [`LogLevel`].
macro_rules! buffer_log_methods {
    ($($method:ident => $level:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                if let Ok(mut guard) = self.entries.lock() {
                    guard.push(LogEntry {
                        level: LogLevel::$level,
                        message: msg.to_string(),
                    });
                }
            }
        )+
    };
}

/// Logger that captures every line in memory.
///
/// Lets callers of the library, and the test suites, assert on the
/// human-readable trace of a run without installing a subscriber.
#[derive(Debug, Default)]
pub struct BufferedLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl BufferedLog {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of all captured entries.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .map_or_else(|_| vec![], |guard| guard.clone())
    }

    /// Return the messages captured at `level`.
    #[must_use]
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|e| e.level == level)
            .map(|e| e.message)
            .collect()
    }
}

impl Log for BufferedLog {
    buffer_log_methods!(
        stage => Stage,
        info => Info,
        debug => Debug,
        warn => Warn,
        error => Error,
        dry_run => DryRun,
        skip => Skip,
    );
}
