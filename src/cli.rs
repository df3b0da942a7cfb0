//! Command-line interface.
use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::Settings;

/// Version reported by `--version`: the build-time `DOTFILER_VERSION` when
/// set, otherwise the package version.
pub const VERSION: &str = match option_env!("DOTFILER_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

/// Link every entry of a dotfiles tree into a base directory.
///
/// Top-level names gain a leading dot.  Nothing is written unless
/// `--commit` is given.
#[derive(Parser, Debug)]
#[command(name = "dotfiler", version = VERSION)]
pub struct Cli {
    /// Dotfiles source directory
    pub source: PathBuf,

    /// Directory to link into [default: $HOME]
    #[arg(short, long, value_name = "PATH")]
    pub base: Option<PathBuf>,

    /// Apply changes instead of only reporting them
    #[arg(short, long)]
    pub commit: bool,

    /// Leave existing files in place instead of moving them to <name>.dotfiler
    #[arg(long = "no-backup", action = ArgAction::SetFalse)]
    pub backup: bool,

    /// Replace existing symbolic links
    #[arg(short, long)]
    pub force: bool,

    /// Glob pattern, relative to the source directory, to leave alone (repeatable)
    #[arg(short = 'k', long = "skip", value_name = "GLOB")]
    pub skip: Vec<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Settings described by the flags alone, linking into `base`.
    #[must_use]
    pub fn settings(&self, base: PathBuf) -> Settings {
        self.skip.iter().fold(
            Settings::new(base)
                .commit(self.commit)
                .backup(self.backup)
                .force(self.force),
            |settings, pattern| settings.skip(pattern.as_str()),
        )
    }
}
