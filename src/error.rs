//! Domain-specific error types for dotfiler.
//!
//! Two families of failure exist and they are handled very differently:
//!
//! ```text
//! ConfigError     : bad source, base, pattern or settings file; aborts the run
//! OperationError  : a single mkdir/rename/symlink/unlink failed; logged, walk continues
//! ```
//!
//! Command handlers at the CLI boundary convert [`ConfigError`] into
//! [`anyhow::Error`] via `?`.  [`OperationError`] never leaves the linker; it
//! is rendered into a failed [`Event`](crate::linker::Event) instead.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors detected before the walk starts.  Nothing has been mutated when
/// one of these is returned.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The source directory cannot be resolved or listed.
    #[error("cannot read source directory {path}: {source}")]
    SourceUnreadable {
        /// Path as given by the user.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The base directory does not exist or is not a directory.
    #[error("base directory does not exist: {0}")]
    BaseMissing(PathBuf),

    /// No base was given and the home directory cannot be determined.
    #[error("HOME environment variable is not set; pass --base")]
    HomeUnset,

    /// A skip pattern is not a valid glob.
    #[error("invalid skip pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Parser message from the glob crate.
        message: String,
    },

    /// The settings file exists but cannot be read.
    #[error("cannot read settings file {path}: {source}")]
    SettingsFile {
        /// Path of the settings file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The settings file is not valid TOML or has unknown keys.
    #[error("invalid settings file {path}: {message}")]
    SettingsParse {
        /// Path of the settings file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
}

/// A filesystem mutation performed by the linker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Recursive directory creation.
    CreateDir,
    /// Rename of a target to its backup path.
    Rename,
    /// Symbolic link creation.
    Symlink,
    /// Removal of an existing symbolic link.
    Unlink,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CreateDir => "create directory",
            Self::Rename => "rename",
            Self::Symlink => "create link",
            Self::Unlink => "remove link",
        };
        f.write_str(name)
    }
}

/// A single filesystem operation failed.  Local to one entry.
#[derive(Error, Debug)]
#[error("{op} {path}: {source}")]
pub struct OperationError {
    /// Which mutation failed.
    pub op: Operation,
    /// Path the operation was applied to.
    pub path: PathBuf,
    /// Underlying I/O error.
    pub source: std::io::Error,
}

impl OperationError {
    /// Wrap an I/O error raised by `op` on `path`.
    #[must_use]
    pub fn new(op: Operation, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self {
            op,
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn source_unreadable_display() {
        let e = ConfigError::SourceUnreadable {
            path: PathBuf::from("/nope"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(
            e.to_string(),
            "cannot read source directory /nope: no such file"
        );
    }

    #[test]
    fn base_missing_display() {
        let e = ConfigError::BaseMissing(PathBuf::from("/home/ghost"));
        assert_eq!(e.to_string(), "base directory does not exist: /home/ghost");
    }

    #[test]
    fn invalid_pattern_display() {
        let e = ConfigError::InvalidPattern {
            pattern: "[".to_string(),
            message: "invalid range pattern".to_string(),
        };
        assert!(e.to_string().contains("'['"));
        assert!(e.to_string().contains("invalid range pattern"));
    }

    #[test]
    fn settings_file_has_source() {
        use std::error::Error as StdError;
        let e = ConfigError::SettingsFile {
            path: PathBuf::from("/src/dotfiler.toml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.source().is_some());
    }

    #[test]
    fn operation_error_display_names_operation_and_path() {
        let e = OperationError::new(
            Operation::Symlink,
            "/home/u/.vimrc",
            io::Error::new(io::ErrorKind::AlreadyExists, "File exists"),
        );
        assert_eq!(e.to_string(), "create link /home/u/.vimrc: File exists");
    }

    #[test]
    fn operation_display() {
        assert_eq!(Operation::CreateDir.to_string(), "create directory");
        assert_eq!(Operation::Rename.to_string(), "rename");
        assert_eq!(Operation::Unlink.to_string(), "remove link");
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn error_types_are_send_sync() {
        assert_send_sync::<ConfigError>();
        assert_send_sync::<OperationError>();
    }

    #[test]
    fn config_error_converts_to_anyhow() {
        let e = ConfigError::HomeUnset;
        let _anyhow_err: anyhow::Error = e.into();
    }
}
