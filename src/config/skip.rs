//! Glob-based exclusion of source entries.
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::file::SETTINGS_FILE;

/// Absolute source paths excluded from linking.
///
/// Patterns are expanded once against the source root before the walk
/// starts, so a pattern such as `config/nvim` excludes a nested entry and
/// everything below it.
#[derive(Debug, Clone, Default)]
pub struct SkipList {
    paths: HashSet<PathBuf>,
}

impl SkipList {
    /// Expand `patterns` relative to `root`.
    ///
    /// The settings file at the root is always excluded.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] for a malformed glob.
    pub fn resolve(root: &Path, patterns: &[String]) -> Result<Self, ConfigError> {
        let escaped_root = glob::Pattern::escape(&root.to_string_lossy());
        let mut paths = HashSet::new();
        paths.insert(root.join(SETTINGS_FILE));

        for pattern in patterns {
            let full = format!("{escaped_root}/{}", pattern.trim_start_matches('/'));
            let matches = glob::glob(&full).map_err(|e| ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                message: e.msg.to_string(),
            })?;
            // Unreadable directories simply contribute no matches.
            paths.extend(matches.filter_map(Result::ok));
        }

        Ok(Self { paths })
    }

    /// Whether `path` was matched by a pattern.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    /// Number of excluded paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether nothing is excluded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
