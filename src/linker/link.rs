//! Linking individual files.
use super::{LinkState, Walk};
use crate::error::{Operation, OperationError};
use crate::linker::event::{Action, Outcome, SkipReason};
use crate::linker::mapping::TargetEntry;

impl Walk<'_> {
    /// Link `entry.target` to `entry.source`, clearing the way first when
    /// the settings allow it.
    pub(super) fn link_file(&mut self, entry: &TargetEntry) {
        if self.skip.contains(&entry.source) {
            self.record(entry, Action::Link, Outcome::Skipped(SkipReason::Excluded));
            return;
        }
        if self.abandoned.contains(&entry.source) {
            return;
        }
        match self.state(&entry.target) {
            LinkState::Absent => {}
            LinkState::Symlink if !self.settings.force || self.links_to_source(entry) => {
                self.record(entry, Action::Link, Outcome::Skipped(SkipReason::AlreadyLink));
                return;
            }
            LinkState::Symlink => {
                if !self.unlink(entry) {
                    return;
                }
            }
            LinkState::Directory | LinkState::Other if !self.settings.backup => {
                self.record(
                    entry,
                    Action::Link,
                    Outcome::Skipped(SkipReason::BackupsDisabled),
                );
                return;
            }
            LinkState::Directory | LinkState::Other => {
                if !self.back_up(entry) {
                    return;
                }
            }
        }
        self.apply(entry, Action::Link, |fs| {
            if let Some(parent) = entry.target.parent() {
                fs.create_dir_all(parent)
                    .map_err(|e| OperationError::new(Operation::CreateDir, parent, e))?;
            }
            fs.symlink(&entry.source, &entry.target)
                .map_err(|e| OperationError::new(Operation::Symlink, &entry.target, e))
        });
    }

    /// Remove the link at `entry.target`.
    ///
    /// Returns `true` when the link was (or would be) removed.
    pub(super) fn unlink(&mut self, entry: &TargetEntry) -> bool {
        let removed = self.apply(entry, Action::Unlink, |fs| {
            fs.remove_link(&entry.target)
                .map_err(|e| OperationError::new(Operation::Unlink, &entry.target, e))
        });
        if removed {
            self.vacate(entry.target.clone());
        }
        removed
    }
}
