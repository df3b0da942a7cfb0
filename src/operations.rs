//! Filesystem operation abstractions for dependency injection.
//!
//! The linker performs every filesystem read and mutation through
//! [`FileSystemOps`] so that tests can inject faults into individual
//! operations.  Production code
//! uses [`SystemFileSystemOps`].

use std::path::{Path, PathBuf};

use crate::linker::LinkState;

/// Abstraction over the filesystem calls made by the linker.
pub trait FileSystemOps: Send + Sync + std::fmt::Debug {
    /// Classify `path` without following a final symbolic link.
    fn link_state(&self, path: &Path) -> LinkState;

    /// Return the immediate child paths inside `path`, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` cannot be opened or read as a directory.
    fn read_dir(&self, path: &Path) -> std::io::Result<Vec<PathBuf>>;

    /// Read the target of the symbolic link at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is not a symlink or cannot be read.
    fn read_link(&self, path: &Path) -> std::io::Result<PathBuf>;

    /// Create `path` and any missing ancestors.
    ///
    /// # Errors
    ///
    /// Returns an error if any directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> std::io::Result<()>;

    /// Move `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns an error if the rename fails.
    fn rename(&self, from: &Path, to: &Path) -> std::io::Result<()>;

    /// Create a symbolic link at `link` pointing to `original`.
    ///
    /// # Errors
    ///
    /// Returns an error if `link` exists or cannot be created.
    fn symlink(&self, original: &Path, link: &Path) -> std::io::Result<()>;

    /// Remove the symbolic link at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if removal fails.
    fn remove_link(&self, path: &Path) -> std::io::Result<()>;
}

/// Production [`FileSystemOps`] implementation that delegates to [`std::fs`].
#[derive(Debug, Default)]
pub struct SystemFileSystemOps;

impl FileSystemOps for SystemFileSystemOps {
    fn link_state(&self, path: &Path) -> LinkState {
        match std::fs::symlink_metadata(path) {
            Err(_) => LinkState::Absent,
            Ok(meta) if meta.file_type().is_symlink() => LinkState::Symlink,
            Ok(meta) if meta.is_dir() => LinkState::Directory,
            Ok(_) => LinkState::Other,
        }
    }

    fn read_dir(&self, path: &Path) -> std::io::Result<Vec<PathBuf>> {
        std::fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect()
    }

    fn read_link(&self, path: &Path) -> std::io::Result<PathBuf> {
        std::fs::read_link(path)
    }

    fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> std::io::Result<()> {
        std::fs::rename(from, to)
    }

    fn symlink(&self, original: &Path, link: &Path) -> std::io::Result<()> {
        std::os::unix::fs::symlink(original, link)
    }

    fn remove_link(&self, path: &Path) -> std::io::Result<()> {
        std::fs::remove_file(path)
    }
}

/// Test doubles for [`FileSystemOps`].
#[cfg(test)]
pub mod test_helpers {
    use std::collections::HashSet;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    use super::{FileSystemOps, SystemFileSystemOps};
    use crate::linker::LinkState;

    /// Real filesystem wrapper that fails every mutation aimed at a chosen
    /// set of paths with `PermissionDenied`, and records the mutations it
    /// let through.
    #[derive(Debug, Default)]
    pub struct FaultyFileSystemOps {
        inner: SystemFileSystemOps,
        failing: HashSet<PathBuf>,
        mutations: Mutex<Vec<String>>,
    }

    impl FaultyFileSystemOps {
        /// Create a wrapper that fails nothing.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Fail every mutation whose subject path is `path`, and any listing
        /// of `path`.
        #[must_use]
        pub fn failing_on(mut self, path: impl Into<PathBuf>) -> Self {
            self.failing.insert(path.into());
            self
        }

        /// Mutations that reached the real filesystem, in order.
        #[must_use]
        pub fn mutations(&self) -> Vec<String> {
            self.mutations
                .lock()
                .map_or_else(|_| vec![], |guard| guard.clone())
        }

        fn fault(&self, path: &Path) -> std::io::Result<()> {
            if self.failing.contains(path) {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "injected failure",
                ));
            }
            Ok(())
        }

        fn check(&self, op: &str, path: &Path) -> std::io::Result<()> {
            self.fault(path)?;
            if let Ok(mut guard) = self.mutations.lock() {
                guard.push(format!("{op} {}", path.display()));
            }
            Ok(())
        }
    }

    impl FileSystemOps for FaultyFileSystemOps {
        fn link_state(&self, path: &Path) -> LinkState {
            self.inner.link_state(path)
        }

        fn read_dir(&self, path: &Path) -> std::io::Result<Vec<PathBuf>> {
            self.fault(path)?;
            self.inner.read_dir(path)
        }

        fn read_link(&self, path: &Path) -> std::io::Result<PathBuf> {
            self.inner.read_link(path)
        }

        fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
            self.check("mkdir", path)?;
            self.inner.create_dir_all(path)
        }

        fn rename(&self, from: &Path, to: &Path) -> std::io::Result<()> {
            self.check("rename", from)?;
            self.inner.rename(from, to)
        }

        fn symlink(&self, original: &Path, link: &Path) -> std::io::Result<()> {
            self.check("symlink", link)?;
            self.inner.symlink(original, link)
        }

        fn remove_link(&self, path: &Path) -> std::io::Result<()> {
            self.check("unlink", path)?;
            self.inner.remove_link(path)
        }
    }
}
