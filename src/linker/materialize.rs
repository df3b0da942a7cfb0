//! Creating target directories for source subdirectories.
use super::{LinkState, Walk};
use crate::error::{Operation, OperationError};
use crate::linker::event::{Action, Outcome, SkipReason};
use crate::linker::mapping::TargetEntry;

impl Walk<'_> {
    /// Make sure the target directory for `entry` exists.
    ///
    /// Returns whether the walk should descend into the source directory.
    /// A failed creation still descends: linking a file creates missing
    /// parents again and reports its own failure.
    pub(super) fn materialize(&mut self, entry: &TargetEntry) -> bool {
        if self.skip.contains(&entry.source) {
            self.record(entry, Action::CreateDir, Outcome::Skipped(SkipReason::Excluded));
            return false;
        }
        if self.abandoned.contains(&entry.source) {
            return false;
        }
        match self.state(&entry.target) {
            LinkState::Absent => {
                self.create_dir(entry);
                true
            }
            LinkState::Directory => {
                self.record(entry, Action::CreateDir, Outcome::Skipped(SkipReason::Exists));
                true
            }
            // Nothing can be created below a file.
            LinkState::Other => {
                self.record(entry, Action::CreateDir, Outcome::Skipped(SkipReason::Exists));
                false
            }
            LinkState::Symlink if !self.settings.force || self.links_to_source(entry) => {
                self.record(
                    entry,
                    Action::CreateDir,
                    Outcome::Skipped(SkipReason::AlreadyLink),
                );
                false
            }
            LinkState::Symlink => {
                if !self.unlink(entry) {
                    return false;
                }
                self.create_dir(entry);
                true
            }
        }
    }

    fn create_dir(&mut self, entry: &TargetEntry) -> bool {
        self.apply(entry, Action::CreateDir, |fs| {
            fs.create_dir_all(&entry.target)
                .map_err(|e| OperationError::new(Operation::CreateDir, &entry.target, e))
        })
    }
}
