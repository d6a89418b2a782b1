// mdscrub/src/cli.rs
//! This file defines the command-line interface (CLI) for the mdscrub
//! application, including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "mdscrub",
    author = "mdscrub contributors",
    version = env!("CARGO_PKG_VERSION"),
    about = "Make user-authored text Markdown-safe",
    long_about = "mdscrub is a command-line utility for making arbitrary user-authored text safe to embed in a Markdown document. It strips invisible Unicode formatting characters, rewrites backslash-escaped punctuation and LaTeX environment markers known to break KaTeX-aware renderers, and preserves fenced and inline code spans verbatim.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG for the 'mdscrub' crates to DEBUG)
    #[arg(long, short = 'd', help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `mdscrub` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sanitizes an input file or stdin, producing Markdown-safe text.
    #[command(about = "Sanitizes an input file or stdin, producing Markdown-safe text.")]
    Sanitize(SanitizeCommand),

    /// Scans an input and reports what would be rewritten, without rewriting.
    #[command(about = "Scans an input and reports what would be rewritten, without rewriting.")]
    Scan(ScanCommand),
}

/// Arguments for the `sanitize` command.
#[derive(Parser, Debug)]
pub struct SanitizeCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Write sanitized output to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Path to a custom scrub rule configuration file (YAML).
    #[arg(long = "config", value_name = "FILE", help = "Path to a custom scrub rule configuration file (YAML).")]
    pub config: Option<PathBuf>,

    /// Explicitly enable these opt-in rule names (comma-separated).
    #[arg(long, short = 'e', value_delimiter = ',', help = "Explicitly enable these opt-in rule names (comma-separated).")]
    pub enable: Vec<String>,

    /// Explicitly disable these rule names (comma-separated).
    #[arg(long, short = 'x', value_delimiter = ',', help = "Explicitly disable these rule names (comma-separated).")]
    pub disable: Vec<String>,

    /// Suppress the rewrite summary.
    #[arg(long = "no-summary", help = "Suppress the rewrite summary.")]
    pub no_summary: bool,
}

/// Arguments for the `scan` command.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Path to a custom scrub rule configuration file (YAML).
    #[arg(long = "config", value_name = "FILE", help = "Path to a custom scrub rule configuration file (YAML).")]
    pub config: Option<PathBuf>,

    /// Explicitly enable these opt-in rule names (comma-separated).
    #[arg(long, short = 'e', value_delimiter = ',', help = "Explicitly enable these opt-in rule names (comma-separated).")]
    pub enable: Vec<String>,

    /// Explicitly disable these rule names (comma-separated).
    #[arg(long, short = 'x', value_delimiter = ',', help = "Explicitly disable these rule names (comma-separated).")]
    pub disable: Vec<String>,
}
