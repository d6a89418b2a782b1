//! Scrub command implementations: sanitize an input into Markdown-safe text,
//! or scan it and report what would be rewritten.

use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use mdscrub_core::{
    engine::SanitizationEngine, merge_rules, MarkdownEngine, ScrubConfig, ScrubSummaryItem,
};

use crate::cli::{SanitizeCommand, ScanCommand};

/// Options for the ergonomic run_sanitize_opts API.
pub struct SanitizeOptions {
    pub input: String,
    pub output_path: Option<PathBuf>,
    pub no_summary: bool,
    pub quiet: bool,
}

/// Builds the active rule configuration: defaults, optional user overrides,
/// then CLI enable/disable filtering.
pub fn build_config(
    config_path: Option<&Path>,
    enable: &[String],
    disable: &[String],
) -> Result<ScrubConfig> {
    let default_config = ScrubConfig::load_default_rules()?;

    let user_config = match config_path {
        Some(path) => Some(
            ScrubConfig::load_from_file(path)
                .with_context(|| format!("Failed to load rules from {}", path.display()))?,
        ),
        None => None,
    };

    let mut config = merge_rules(default_config, user_config);
    config.set_active_rules(enable, disable);
    Ok(config)
}

/// Reads the full input, from a file when given or from stdin otherwise.
pub fn read_input(input_file: Option<&Path>) -> Result<String> {
    match input_file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}

/// The main operation runner for the `sanitize` command.
pub fn run_sanitize_opts(engine: &dyn SanitizationEngine, opts: SanitizeOptions) -> Result<()> {
    info!("Starting mdscrub sanitize operation.");

    let (sanitized_content, summary) = engine
        .sanitize(&opts.input, "cli-input")
        .context("Sanitization failed")?;

    debug!(
        "Content sanitized. Original length: {}, Sanitized length: {}",
        opts.input.len(),
        sanitized_content.len()
    );

    handle_primary_output(&opts, &sanitized_content)?;

    if !opts.no_summary && !opts.quiet {
        print_summary(&summary, &mut io::stderr())?;
    }

    info!("mdscrub sanitize operation completed.");
    Ok(())
}

fn handle_primary_output(opts: &SanitizeOptions, sanitized_content: &str) -> Result<()> {
    if let Some(path) = opts.output_path.clone() {
        info!("Writing sanitized content to file: {}", path.display());
        let mut file = fs::File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        writeln!(file, "{}", sanitized_content)?;
    } else {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        writeln!(writer, "{}", sanitized_content)?;
    }
    Ok(())
}

/// Writes a per-rule rewrite summary.
fn print_summary(summary: &[ScrubSummaryItem], writer: &mut impl Write) -> Result<()> {
    if summary.is_empty() {
        writeln!(writer, "mdscrub: no rewrites applied.")?;
        return Ok(());
    }
    writeln!(writer, "mdscrub rewrite summary:")?;
    for item in summary {
        writeln!(
            writer,
            "  {} ({} occurrence{})",
            item.rule_name,
            item.occurrences,
            if item.occurrences == 1 { "" } else { "s" }
        )?;
    }
    Ok(())
}

/// Entry point for the `sanitize` subcommand.
pub fn run_sanitize(cmd: &SanitizeCommand, quiet: bool) -> Result<()> {
    let config = build_config(cmd.config.as_deref(), &cmd.enable, &cmd.disable)?;
    let engine = MarkdownEngine::new(config)?;
    let input = read_input(cmd.input_file.as_deref())?;

    run_sanitize_opts(
        &engine,
        SanitizeOptions {
            input,
            output_path: cmd.output.clone(),
            no_summary: cmd.no_summary,
            quiet,
        },
    )
}

/// Entry point for the `scan` subcommand: prints the would-be rewrite
/// summary as JSON without modifying the input.
pub fn run_scan(cmd: &ScanCommand) -> Result<()> {
    let config = build_config(cmd.config.as_deref(), &cmd.enable, &cmd.disable)?;
    let engine = MarkdownEngine::new(config)?;
    let input = read_input(cmd.input_file.as_deref())?;

    let summary = engine
        .analyze_for_stats(&input, "cli-input")
        .context("Scan failed")?;

    let json = serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
    println!("{}", json);
    Ok(())
}
