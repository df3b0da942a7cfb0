//! Dotfile link bootstrapper.
//!
//! Mirrors a source tree of dotfiles into a base directory (usually `$HOME`)
//! as symbolic links.  Top-level names gain a leading dot, existing files
//! are moved aside to `<name>.dotfiler`, and nothing is written unless a
//! run is committed.
//!
//! - **[`config`]**: run settings, skip patterns, and the `dotfiler.toml` file
//! - **[`linker`]**: path mapping and the tree walk that creates links
//! - **[`operations`]**: the filesystem seam used by the linker
//! - **[`logging`]**: console and file logging through `tracing`
//! - **[`commands`]**: the command-line workflow built from the above
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod linker;
pub mod logging;
pub mod operations;
