//! Structured record of every decision taken during a run.
use std::fmt;
use std::path::PathBuf;

/// What the linker intended to do with an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Create the target directory for a source subdirectory.
    CreateDir,
    /// Move an existing target out of the way.
    Backup {
        /// Destination of the move.
        to: PathBuf,
    },
    /// Remove an existing symbolic link before relinking.
    Unlink,
    /// Create a symbolic link to the source.
    Link,
    /// List a source directory.
    Scan,
}

impl Action {
    /// Short verb used in traces.
    #[must_use]
    pub const fn verb(&self) -> &'static str {
        match self {
            Self::CreateDir => "mkdir",
            Self::Backup { .. } => "backup",
            Self::Unlink => "unlink",
            Self::Link => "link",
            Self::Scan => "scan",
        }
    }
}

/// Why an action was not taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Matched a skip pattern.
    Excluded,
    /// The target is already a symbolic link and force is off.
    AlreadyLink,
    /// The target directory already exists.
    Exists,
    /// The backup location is already occupied.
    BackupExists,
    /// The target exists, is not a link, and backups are disabled.
    BackupsDisabled,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Excluded => "matches a skip pattern",
            Self::AlreadyLink => "already a link",
            Self::Exists => "already exists",
            Self::BackupExists => "backup already exists",
            Self::BackupsDisabled => "exists and backups are disabled",
        };
        f.write_str(text)
    }
}

/// What became of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Dry run: the action would be performed.
    Planned,
    /// The action was performed.
    Done,
    /// The action was not attempted.
    Skipped(SkipReason),
    /// The action was attempted and the filesystem refused it.
    Failed(String),
}

/// One decision about one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Path relative to the source root.
    pub rel: PathBuf,
    /// Absolute source path.
    pub source: PathBuf,
    /// Absolute target path.
    pub target: PathBuf,
    /// Intended action.
    pub action: Action,
    /// Result of the action.
    pub outcome: Outcome,
}

impl Event {
    /// Whether the action was performed or would be in commit mode.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self.outcome, Outcome::Planned | Outcome::Done)
    }

    /// Description of the action itself, without its outcome.
    fn describe(&self) -> String {
        let target = self.target.display();
        match &self.action {
            Action::CreateDir => format!("create {target}/"),
            Action::Backup { to } => format!("move {target} => {}", to.display()),
            Action::Unlink => format!("unlink {target}"),
            Action::Link => format!("link {target} -> {}", self.source.display()),
            Action::Scan => format!("scan {}", self.source.display()),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Planned | Outcome::Done => f.write_str(&self.describe()),
            Outcome::Skipped(reason) => write!(f, "skip {} ({reason})", self.target.display()),
            Outcome::Failed(message) => write!(f, "{} failed: {message}", self.describe()),
        }
    }
}

/// Counts derived from a [`Report`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Links created (or planned).
    pub linked: usize,
    /// Targets moved to a backup (or planned).
    pub backed_up: usize,
    /// Directories created (or planned).
    pub created: usize,
    /// Existing links removed (or planned).
    pub unlinked: usize,
    /// Actions not attempted.
    pub skipped: usize,
    /// Actions that failed.
    pub failed: usize,
}

/// Ordered event stream for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Every event, in the order it happened.
    pub events: Vec<Event>,
}

impl Report {
    /// Append an event.
    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Tally the events.
    #[must_use]
    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        for event in &self.events {
            match &event.outcome {
                Outcome::Skipped(_) => summary.skipped += 1,
                Outcome::Failed(_) => summary.failed += 1,
                Outcome::Planned | Outcome::Done => match event.action {
                    Action::CreateDir => summary.created += 1,
                    Action::Backup { .. } => summary.backed_up += 1,
                    Action::Unlink => summary.unlinked += 1,
                    Action::Link => summary.linked += 1,
                    Action::Scan => {}
                },
            }
        }
        summary
    }

    /// Whether any action failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e.outcome, Outcome::Failed(_)))
    }

    /// Whether any mutation was performed.
    #[must_use]
    pub fn has_mutations(&self) -> bool {
        self.events.iter().any(|e| e.outcome == Outcome::Done)
    }

    /// `verb rel` pairs for every event, with the outcome dropped.
    ///
    /// A dry run and a commit run over the same tree produce the same plan.
    #[must_use]
    pub fn plan(&self) -> Vec<String> {
        self.events
            .iter()
            .map(|e| format!("{} {}", e.action.verb(), e.rel.display()))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn event(action: Action, outcome: Outcome) -> Event {
        Event {
            rel: PathBuf::from("vimrc"),
            source: PathBuf::from("/src/vimrc"),
            target: PathBuf::from("/home/u/.vimrc"),
            action,
            outcome,
        }
    }

    #[test]
    fn link_display() {
        let e = event(Action::Link, Outcome::Done);
        assert_eq!(e.to_string(), "link /home/u/.vimrc -> /src/vimrc");
    }

    #[test]
    fn backup_display() {
        let e = event(
            Action::Backup {
                to: PathBuf::from("/home/u/vimrc.dotfiler"),
            },
            Outcome::Planned,
        );
        assert_eq!(
            e.to_string(),
            "move /home/u/.vimrc => /home/u/vimrc.dotfiler"
        );
    }

    #[test]
    fn skip_display_names_reason() {
        let e = event(Action::Link, Outcome::Skipped(SkipReason::AlreadyLink));
        assert_eq!(e.to_string(), "skip /home/u/.vimrc (already a link)");
    }

    #[test]
    fn failure_display_includes_message() {
        let e = event(Action::Link, Outcome::Failed("permission denied".into()));
        assert_eq!(
            e.to_string(),
            "link /home/u/.vimrc -> /src/vimrc failed: permission denied"
        );
    }

    #[test]
    fn summary_counts_by_action_and_outcome() {
        let mut report = Report::default();
        report.push(event(Action::CreateDir, Outcome::Done));
        report.push(event(Action::Link, Outcome::Done));
        report.push(event(Action::Link, Outcome::Planned));
        report.push(event(Action::Unlink, Outcome::Done));
        report.push(event(
            Action::Backup {
                to: PathBuf::from("/x"),
            },
            Outcome::Done,
        ));
        report.push(event(Action::Link, Outcome::Skipped(SkipReason::Excluded)));
        report.push(event(Action::Link, Outcome::Failed("nope".into())));

        let s = report.summary();
        assert_eq!(s.created, 1);
        assert_eq!(s.linked, 2);
        assert_eq!(s.unlinked, 1);
        assert_eq!(s.backed_up, 1);
        assert_eq!(s.skipped, 1);
        assert_eq!(s.failed, 1);
        assert!(report.has_failures());
        assert!(report.has_mutations());
    }

    #[test]
    fn planned_events_are_not_mutations() {
        let mut report = Report::default();
        report.push(event(Action::Link, Outcome::Planned));
        assert!(!report.has_mutations());
        assert!(report.events.first().unwrap().is_applied());
    }

    #[test]
    fn plan_drops_outcome() {
        let mut report = Report::default();
        report.push(event(Action::Link, Outcome::Planned));
        report.push(event(Action::CreateDir, Outcome::Skipped(SkipReason::Exists)));
        assert_eq!(report.plan(), vec!["link vimrc", "mkdir vimrc"]);
    }
}
