//! Console logger backed by `tracing`, with an end-of-run summary.
use std::path::PathBuf;

use super::types::Log;
use super::utils::log_file_path;
use crate::linker::Summary;

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger with dry-run awareness.
///
/// Every message goes through `tracing`; the subscriber installed by
/// [`init_subscriber`](super::subscriber::init_subscriber) decides what
/// reaches the console and always mirrors everything to the log file at
/// `$XDG_CACHE_HOME/dotfiler/dotfiler.log`.
#[derive(Debug)]
pub struct Logger {
    log_file: Option<PathBuf>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a new logger.
    ///
    /// Only remembers the log file path for the summary; the file itself is
    /// opened by the subscriber.
    #[must_use]
    pub fn new() -> Self {
        Self {
            log_file: log_file_path(),
        }
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: "dotfiler::stage", "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: "dotfiler::dry_run", "{msg}");
    }

    /// Log an entry the linker left alone.
    pub fn skip(&self, msg: &str) {
        tracing::info!(target: "dotfiler::skip", "{msg}");
    }

    /// Print the run summary.
    pub fn print_summary(&self, summary: &Summary, commit: bool) {
        self.stage("Summary");

        let verb = if commit { "" } else { "would be " };
        self.info(&format!(
            "\x1b[32m{} {verb}linked\x1b[0m, {} {verb}backed up, {} {verb}created, {} {verb}unlinked",
            summary.linked, summary.backed_up, summary.created, summary.unlinked
        ));
        self.info(&format!(
            "\x1b[33m{} skipped\x1b[0m, \x1b[31m{} failed\x1b[0m",
            summary.skipped, summary.failed
        ));
        if !commit {
            self.info("dry run: nothing was written, pass --commit to apply");
        }

        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error, dry_run, skip);
}
