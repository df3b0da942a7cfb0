//! The `dotfiler` command: link a source tree and print a summary.
use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::cli::{Cli, VERSION};
use crate::config::resolve_base;
use crate::linker::{Linker, Report};
use crate::logging::Logger;

/// Run the link command.
///
/// Failed entries are part of the returned report and do not make the
/// command fail.
///
/// # Errors
///
/// Returns an error if the base directory cannot be resolved, the settings
/// file is invalid, or the linker rejects its configuration.
pub fn run(cli: &Cli, log: &Arc<Logger>) -> Result<Report> {
    log.info(&format!("dotfiler {VERSION}"));

    let base = resolve_base(cli.base.as_deref()).context("resolving base directory")?;
    let settings = cli
        .settings(base)
        .with_file(&cli.source)
        .with_context(|| format!("loading settings from {}", cli.source.display()))?;
    log.debug(&format!(
        "commit: {}, backup: {}, force: {}",
        settings.commit, settings.backup, settings.force
    ));
    for pattern in &settings.skip_patterns {
        log.debug(&format!("skip pattern: {pattern}"));
    }

    let linker = Linker::new(settings, log.clone());
    let report = linker
        .run(&cli.source)
        .with_context(|| format!("linking {}", cli.source.display()))?;

    log.print_summary(&report.summary(), linker.settings().commit);
    if report.has_failures() {
        log.warn("some entries could not be linked, see the errors above");
    }
    Ok(report)
}
