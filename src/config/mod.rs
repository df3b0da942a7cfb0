//! Run settings: command-line flags merged with the optional settings file.
pub mod file;
pub mod skip;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Immutable settings for one linker run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Target base directory (usually `$HOME`).
    pub base: PathBuf,
    /// Apply changes; when `false` every action is only reported.
    pub commit: bool,
    /// Move existing non-link targets to `<name>.dotfiler` before linking.
    pub backup: bool,
    /// Replace existing symbolic links.
    pub force: bool,
    /// Glob patterns, relative to the source root, to leave alone.
    pub skip_patterns: Vec<String>,
}

impl Settings {
    /// Dry-run settings with backups enabled and no skip patterns.
    #[must_use]
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            commit: false,
            backup: true,
            force: false,
            skip_patterns: Vec::new(),
        }
    }

    /// Set the commit flag.
    #[must_use]
    pub const fn commit(mut self, commit: bool) -> Self {
        self.commit = commit;
        self
    }

    /// Set the backup flag.
    #[must_use]
    pub const fn backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }

    /// Set the force flag.
    #[must_use]
    pub const fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Append a skip pattern.
    #[must_use]
    pub fn skip(mut self, pattern: impl Into<String>) -> Self {
        self.skip_patterns.push(pattern.into());
        self
    }

    /// Merge the settings file found in `source_root` into these settings.
    ///
    /// Command-line flags win: `--no-backup` cannot be re-enabled by the
    /// file and `--force` cannot be disabled by it.  Skip patterns are
    /// concatenated.  `commit` and `base` are never taken from the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be read or parsed.
    pub fn with_file(mut self, source_root: &Path) -> Result<Self, ConfigError> {
        let from_file = file::load(source_root)?;
        self.backup = self.backup && from_file.backup.unwrap_or(true);
        self.force = self.force || from_file.force.unwrap_or(false);
        self.skip_patterns.extend(from_file.skip);
        Ok(self)
    }
}

/// Resolve the base directory: an explicit path, or `$HOME`.
///
/// # Errors
///
/// Returns an error if no base is given and `HOME` is unset.
pub fn resolve_base(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    resolve_base_from(explicit, std::env::var_os("HOME"))
}

/// [`resolve_base`] with the value of `HOME` passed in.  An empty `home`
/// counts as unset.
fn resolve_base_from(
    explicit: Option<&Path>,
    home: Option<OsString>,
) -> Result<PathBuf, ConfigError> {
    if let Some(base) = explicit {
        return Ok(base.to_path_buf());
    }
    home.filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .ok_or(ConfigError::HomeUnset)
}
