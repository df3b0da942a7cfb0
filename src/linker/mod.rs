//! Tree synchronizer: mirror a source tree into the base directory as links.
//!
//! The walk visits the source tree top-down.  At every level subdirectories
//! are materialized before files are linked, and only then does the walk
//! descend.  Before anything else happens at the root, existing top-level
//! targets that would block a link are moved to their backup location.
//!
//! Every decision becomes an [`Event`] in the returned [`Report`] and a line
//! in the log.  Individual filesystem failures are recorded and the walk
//! moves on; only configuration problems abort a run.
pub mod event;
pub mod mapping;

mod backup;
mod link;
mod materialize;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use event::{Action, Event, Outcome, Report, SkipReason, Summary};
pub use mapping::TargetEntry;

use crate::config::Settings;
use crate::config::skip::SkipList;
use crate::error::{ConfigError, OperationError};
use crate::logging::Log;
use crate::operations::{FileSystemOps, SystemFileSystemOps};

/// What currently occupies a target path.  Final symbolic links are not
/// followed, so a dangling link is still [`LinkState::Symlink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// Nothing is there.
    Absent,
    /// A symbolic link, valid or not.
    Symlink,
    /// A real directory.
    Directory,
    /// A regular file or any other non-link entry.
    Other,
}

impl LinkState {
    /// Whether anything occupies the path.
    #[must_use]
    pub const fn exists(self) -> bool {
        !matches!(self, Self::Absent)
    }
}

/// Links a source tree into a base directory according to [`Settings`].
pub struct Linker {
    settings: Settings,
    log: Arc<dyn Log>,
    fs_ops: Arc<dyn FileSystemOps>,
}

impl std::fmt::Debug for Linker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Linker")
            .field("settings", &self.settings)
            .field("log", &"<dyn Log>")
            .field("fs_ops", &self.fs_ops)
            .finish()
    }
}

impl Linker {
    /// Create a linker operating on the real filesystem.
    #[must_use]
    pub fn new(settings: Settings, log: Arc<dyn Log>) -> Self {
        Self {
            settings,
            log,
            fs_ops: Arc::new(SystemFileSystemOps),
        }
    }

    /// Replace the filesystem backend.
    #[must_use]
    pub fn with_fs_ops(mut self, fs_ops: Arc<dyn FileSystemOps>) -> Self {
        self.fs_ops = fs_ops;
        self
    }

    /// Settings this linker was built with.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Walk `source_dir` and link every entry into the base directory.
    ///
    /// Per-entry failures are part of the returned report, never an `Err`.
    ///
    /// # Errors
    ///
    /// Returns an error, before touching the filesystem, if the source
    /// cannot be resolved or listed, the base directory is missing, or a
    /// skip pattern is invalid.
    pub fn run(&self, source_dir: &Path) -> Result<Report, ConfigError> {
        let unreadable = |source| ConfigError::SourceUnreadable {
            path: source_dir.to_path_buf(),
            source,
        };
        let root = dunce::canonicalize(source_dir).map_err(unreadable)?;
        if !self.settings.base.is_dir() {
            return Err(ConfigError::BaseMissing(self.settings.base.clone()));
        }
        let skip = SkipList::resolve(&root, &self.settings.skip_patterns)?;
        let level = Level::read(self.fs_ops.as_ref(), &root).map_err(unreadable)?;

        self.log.stage(if self.settings.commit {
            "Linking"
        } else {
            "Linking (dry run)"
        });
        self.log.debug(&format!("source: {}", root.display()));
        self.log
            .debug(&format!("base: {}", self.settings.base.display()));
        self.log
            .debug(&format!("{} path(s) excluded by skip patterns", skip.len()));

        let mut walk = Walk {
            settings: &self.settings,
            fs: self.fs_ops.as_ref(),
            log: self.log.as_ref(),
            root: &root,
            skip: &skip,
            vacated: HashSet::new(),
            abandoned: HashSet::new(),
            report: Report::default(),
        };
        if self.settings.backup {
            walk.backup_root(&level);
        }
        walk.walk_level(&level);
        Ok(walk.report)
    }
}

/// The entries of one source directory, split by kind and sorted by name.
#[derive(Debug, Default)]
struct Level {
    dirs: Vec<PathBuf>,
    files: Vec<PathBuf>,
}

impl Level {
    /// List `dir`.  Symbolic links count as files and are never followed.
    fn read(fs: &dyn FileSystemOps, dir: &Path) -> std::io::Result<Self> {
        let mut level = Self::default();
        for path in fs.read_dir(dir)? {
            if fs.link_state(&path) == LinkState::Directory {
                level.dirs.push(path);
            } else {
                level.files.push(path);
            }
        }
        level.dirs.sort();
        level.files.sort();
        Ok(level)
    }
}

/// Mutable state of a single run.
struct Walk<'a> {
    settings: &'a Settings,
    fs: &'a dyn FileSystemOps,
    log: &'a dyn Log,
    root: &'a Path,
    skip: &'a SkipList,
    /// Targets moved or unlinked during this run.
    vacated: HashSet<PathBuf>,
    /// Top-level sources whose backup did not happen; nothing below them is touched.
    abandoned: HashSet<PathBuf>,
    report: Report,
}

impl Walk<'_> {
    fn entry(&self, source: &Path) -> Option<TargetEntry> {
        TargetEntry::new(&self.settings.base, self.root, source)
    }

    /// Classify `path`.  In a dry run anything at or below a vacated target
    /// reads as absent, matching what a commit run would find.
    fn state(&self, path: &Path) -> LinkState {
        if !self.settings.commit && self.vacated.iter().any(|v| path.starts_with(v)) {
            return LinkState::Absent;
        }
        self.fs.link_state(path)
    }

    /// Whether `entry.target` is a link that already points at the source.
    fn links_to_source(&self, entry: &TargetEntry) -> bool {
        self.fs
            .read_link(&entry.target)
            .is_ok_and(|existing| existing == entry.source)
    }

    fn record(&mut self, entry: &TargetEntry, action: Action, outcome: Outcome) {
        let event = Event {
            rel: entry.rel.clone(),
            source: entry.source.clone(),
            target: entry.target.clone(),
            action,
            outcome,
        };
        let line = event.to_string();
        match event.outcome {
            Outcome::Planned => self.log.dry_run(&line),
            Outcome::Done => self.log.info(&line),
            Outcome::Skipped(_) => self.log.skip(&line),
            Outcome::Failed(_) => self.log.error(&line),
        }
        self.report.push(event);
    }

    /// Perform `op` in commit mode, or only plan it in a dry run.
    ///
    /// Returns `true` when the action happened (or would happen).
    fn apply(
        &mut self,
        entry: &TargetEntry,
        action: Action,
        op: impl FnOnce(&dyn FileSystemOps) -> Result<(), OperationError>,
    ) -> bool {
        if !self.settings.commit {
            self.record(entry, action, Outcome::Planned);
            return true;
        }
        let fs = self.fs;
        match op(fs) {
            Ok(()) => {
                self.record(entry, action, Outcome::Done);
                true
            }
            Err(e) => {
                self.record(entry, action, Outcome::Failed(e.to_string()));
                false
            }
        }
    }

    fn walk_level(&mut self, level: &Level) {
        let mut descend = Vec::new();
        for dir in &level.dirs {
            if let Some(entry) = self.entry(dir)
                && self.materialize(&entry)
            {
                descend.push(entry);
            }
        }
        for file in &level.files {
            if let Some(entry) = self.entry(file) {
                self.link_file(&entry);
            }
        }
        for entry in descend {
            match Level::read(self.fs, &entry.source) {
                Ok(child) => self.walk_level(&child),
                Err(e) => self.record(&entry, Action::Scan, Outcome::Failed(e.to_string())),
            }
        }
    }
}
