// Shared helpers for integration tests.
//
// Provides a temporary source tree and base directory plus a fluent builder
// so each integration test can set up an isolated environment without
// repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::os::unix::fs::symlink;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dotfiler::config::Settings;
use dotfiler::linker::{Linker, Report};
use dotfiler::logging::BufferedLog;

/// A dotfiles source tree and an empty base directory, both backed by one
/// [`tempfile::TempDir`].
pub struct TestTree {
    /// Owns both directories; deleted on drop.
    pub root: tempfile::TempDir,
    source: PathBuf,
    base: PathBuf,
}

impl TestTree {
    /// Create an empty source tree and an empty base directory.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        let source = root.path().join("dotfiles");
        let base = root.path().join("home");
        std::fs::create_dir_all(&source).expect("create source dir");
        std::fs::create_dir_all(&base).expect("create base dir");
        // Links point at the resolved source, so compare against it.
        let source = dunce::canonicalize(source).expect("canonicalize source");
        Self { root, source, base }
    }

    /// Path to the source root.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Path to the base directory.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Dry-run settings targeting this tree's base directory.
    pub fn settings(&self) -> Settings {
        Settings::new(&self.base)
    }

    /// Run the linker and return its report.
    pub fn run(&self, settings: Settings) -> Report {
        self.run_logged(settings).0
    }

    /// Run the linker and return its report along with the captured log.
    pub fn run_logged(&self, settings: Settings) -> (Report, Arc<BufferedLog>) {
        let log = Arc::new(BufferedLog::new());
        let report = Linker::new(settings, log.clone())
            .run(&self.source)
            .expect("linker run");
        (report, log)
    }

    /// Target of the link at `base/rel`, or `None` if it is not a link.
    pub fn link_at(&self, rel: &str) -> Option<PathBuf> {
        std::fs::read_link(self.base.join(rel)).ok()
    }

    /// Content of the regular file at `base/rel`.
    pub fn read_base(&self, rel: &str) -> String {
        std::fs::read_to_string(self.base.join(rel)).expect("read base file")
    }

    /// Every entry below the base directory, sorted, one line each:
    /// `path -> link target`, `path/` or `path = content`.
    pub fn base_listing(&self) -> Vec<String> {
        let mut lines = Vec::new();
        list_into(&self.base, &self.base, &mut lines);
        lines.sort();
        lines
    }
}

fn list_into(root: &Path, dir: &Path, lines: &mut Vec<String>) {
    let entries = std::fs::read_dir(dir).expect("read dir");
    for entry in entries {
        let path = entry.expect("dir entry").path();
        let rel = path.strip_prefix(root).expect("under root").display().to_string();
        let meta = path.symlink_metadata().expect("symlink metadata");
        if meta.file_type().is_symlink() {
            let to = std::fs::read_link(&path).expect("read link");
            lines.push(format!("{rel} -> {}", to.display()));
        } else if meta.is_dir() {
            lines.push(format!("{rel}/"));
            list_into(root, &path, lines);
        } else {
            let content = std::fs::read_to_string(&path).unwrap_or_default();
            lines.push(format!("{rel} = {content}"));
        }
    }
}

/// Fluent builder for [`TestTree`].
pub struct TestTreeBuilder {
    tree: TestTree,
}

impl TestTreeBuilder {
    /// Begin building a new, empty tree.
    pub fn new() -> Self {
        Self {
            tree: TestTree::new(),
        }
    }

    /// Write `content` to `source/rel`, creating parents.
    pub fn with_source_file(self, rel: &str, content: &str) -> Self {
        write_with_parents(&self.tree.source.join(rel), content);
        self
    }

    /// Write the settings file at the source root.
    pub fn with_settings_file(self, content: &str) -> Self {
        write_with_parents(&self.tree.source.join("dotfiler.toml"), content);
        self
    }

    /// Write `content` to `base/rel`, creating parents.
    pub fn with_base_file(self, rel: &str, content: &str) -> Self {
        write_with_parents(&self.tree.base.join(rel), content);
        self
    }

    /// Create the directory `base/rel`.
    pub fn with_base_dir(self, rel: &str) -> Self {
        std::fs::create_dir_all(self.tree.base.join(rel)).expect("create base dir");
        self
    }

    /// Create a symbolic link at `base/rel` pointing to `to`.
    pub fn with_base_link(self, rel: &str, to: &Path) -> Self {
        let link = self.tree.base.join(rel);
        if let Some(parent) = link.parent() {
            std::fs::create_dir_all(parent).expect("create link parent");
        }
        symlink(to, link).expect("create base link");
        self
    }

    /// Finish building and return the tree.
    pub fn build(self) -> TestTree {
        self.tree
    }
}

fn write_with_parents(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(path, content).expect("write file");
}
