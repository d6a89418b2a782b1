// mdscrub/src/main.rs
//! mdscrub entry point.
//!
//! Parses the CLI, configures logging, and dispatches to the command
//! implementations.

use anyhow::Result;
use clap::Parser;

use mdscrub::cli::{Cli, Commands};
use mdscrub::commands::scrub;
use mdscrub::logger;

fn main() -> Result<()> {
    let args = Cli::parse();

    if args.quiet {
        logger::init_logger(Some(log::LevelFilter::Off));
    } else if args.debug {
        logger::init_logger(Some(log::LevelFilter::Debug));
    } else {
        logger::init_logger(None);
    }

    match &args.command {
        Commands::Sanitize(cmd) => scrub::run_sanitize(cmd, args.quiet),
        Commands::Scan(cmd) => scrub::run_scan(cmd),
    }
}
