//! The [`Log`] trait shared by every logging backend.

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) writes through `tracing` immediately;
/// [`BufferedLog`](super::buffered::BufferedLog) keeps lines in memory so
/// they can be inspected afterwards.  The linker only sees this trait.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log an action that would be taken in commit mode.
    fn dry_run(&self, msg: &str);
    /// Log an entry left alone (excluded, already linked, already present).
    fn skip(&self, msg: &str);
}
