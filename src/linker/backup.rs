//! Moving existing targets out of the way.
use std::path::PathBuf;

use super::{Level, LinkState, Walk};
use crate::error::{Operation, OperationError};
use crate::linker::event::{Action, Outcome, SkipReason};
use crate::linker::mapping::TargetEntry;

impl Walk<'_> {
    /// Back up every top-level target that would block its source.
    ///
    /// A real directory facing a source directory is left in place and
    /// merged into.  Anything else that is not a link is moved.  When a
    /// backup does not happen the whole top-level entry is abandoned.
    pub(super) fn backup_root(&mut self, level: &Level) {
        let sources = level
            .dirs
            .iter()
            .map(|d| (d, true))
            .chain(level.files.iter().map(|f| (f, false)));
        for (source, source_is_dir) in sources {
            if self.skip.contains(source) {
                continue;
            }
            let Some(entry) = self.entry(source) else {
                continue;
            };
            let blocked = match self.state(&entry.target) {
                LinkState::Other => true,
                LinkState::Directory => !source_is_dir,
                LinkState::Absent | LinkState::Symlink => false,
            };
            if blocked && !self.back_up(&entry) {
                self.abandoned.insert(entry.source);
            }
        }
    }

    /// Move `entry.target` to `entry.backup`.  An occupied backup location
    /// is never overwritten.
    ///
    /// Returns `true` when the target was (or would be) moved.
    pub(super) fn back_up(&mut self, entry: &TargetEntry) -> bool {
        let action = Action::Backup {
            to: entry.backup.clone(),
        };
        if self.state(&entry.backup).exists() {
            self.record(entry, action, Outcome::Skipped(SkipReason::BackupExists));
            return false;
        }
        let moved = self.apply(entry, action, |fs| {
            if let Some(parent) = entry.backup.parent() {
                fs.create_dir_all(parent)
                    .map_err(|e| OperationError::new(Operation::CreateDir, parent, e))?;
            }
            fs.rename(&entry.target, &entry.backup)
                .map_err(|e| OperationError::new(Operation::Rename, &entry.target, e))
        });
        if moved {
            self.vacate(entry.target.clone());
        }
        moved
    }

    /// Remember that `target` no longer holds anything.
    pub(super) fn vacate(&mut self, target: PathBuf) {
        self.vacated.insert(target);
    }
}
