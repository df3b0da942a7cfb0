//! Source-to-target path mapping.
//!
//! Only the first segment of a source-relative path is dotted:
//!
//! ```text
//! source  a/b/c   →  target  <base>/.a/b/c   backup  <base>/a.dotfiler/b/c
//! source  vimrc   →  target  <base>/.vimrc   backup  <base>/vimrc.dotfiler
//! ```
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Suffix appended to the top-level name of a backup.
pub const BACKUP_SUFFIX: &str = ".dotfiler";

/// Split `rel` into its first normal segment and the remainder.
fn split_first(rel: &Path) -> Option<(OsString, PathBuf)> {
    let mut components = rel.components().filter(|c| matches!(c, Component::Normal(_)));
    let first = components.next()?.as_os_str().to_os_string();
    let rest: PathBuf = components.collect();
    Some((first, rest))
}

/// Join `base/<top>` with `rest` unless `rest` is empty.
fn join_top(base: &Path, top: OsString, rest: &Path) -> PathBuf {
    let top_level = base.join(top);
    if rest.as_os_str().is_empty() {
        top_level
    } else {
        top_level.join(rest)
    }
}

/// Map a source-relative path to its target under `base`.
///
/// # Examples
///
/// ```
/// use dotfiler::linker::mapping::target_path;
/// use std::path::{Path, PathBuf};
///
/// let base = Path::new("/home/u");
/// assert_eq!(target_path(base, Path::new("vimrc")), PathBuf::from("/home/u/.vimrc"));
/// assert_eq!(
///     target_path(base, Path::new("config/git/config")),
///     PathBuf::from("/home/u/.config/git/config"),
/// );
/// ```
#[must_use]
pub fn target_path(base: &Path, rel: &Path) -> PathBuf {
    let Some((first, rest)) = split_first(rel) else {
        return base.to_path_buf();
    };
    let mut dotted = OsString::from(".");
    dotted.push(first);
    join_top(base, dotted, &rest)
}

/// Map a source-relative path to the backup location of its target.
///
/// # Examples
///
/// ```
/// use dotfiler::linker::mapping::backup_path;
/// use std::path::{Path, PathBuf};
///
/// let base = Path::new("/home/u");
/// assert_eq!(backup_path(base, Path::new("vimrc")), PathBuf::from("/home/u/vimrc.dotfiler"));
/// assert_eq!(
///     backup_path(base, Path::new("config/git/config")),
///     PathBuf::from("/home/u/config.dotfiler/git/config"),
/// );
/// ```
#[must_use]
pub fn backup_path(base: &Path, rel: &Path) -> PathBuf {
    let Some((mut first, rest)) = split_first(rel) else {
        return base.to_path_buf();
    };
    first.push(BACKUP_SUFFIX);
    join_top(base, first, &rest)
}

/// One source entry and every path derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetEntry {
    /// Absolute path inside the source tree.
    pub source: PathBuf,
    /// Path relative to the source root.
    pub rel: PathBuf,
    /// Where the link (or directory) goes.
    pub target: PathBuf,
    /// Where an existing target is moved to.
    pub backup: PathBuf,
}

impl TargetEntry {
    /// Derive the entry for `source`, which must lie under `source_root`.
    ///
    /// Returns `None` for the root itself or a path outside it.
    #[must_use]
    pub fn new(base: &Path, source_root: &Path, source: &Path) -> Option<Self> {
        let rel = source.strip_prefix(source_root).ok()?;
        if rel.as_os_str().is_empty() {
            return None;
        }
        Some(Self {
            source: source.to_path_buf(),
            rel: rel.to_path_buf(),
            target: target_path(base, rel),
            backup: backup_path(base, rel),
        })
    }
}
