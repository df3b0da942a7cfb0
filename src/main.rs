//! `dotfiler` binary entry point.
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use dotfiler::cli::Cli;
use dotfiler::commands;
use dotfiler::logging::{self, Logger};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    logging::init_subscriber(args.verbose);
    let log = Arc::new(Logger::new());

    commands::link::run(&args, &log).map(drop)
}
