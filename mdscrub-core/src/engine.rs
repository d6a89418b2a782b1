// mdscrub-core/src/engine.rs
//! Defines the core SanitizationEngine trait.
//!
//! The `SanitizationEngine` trait provides a pluggable interface for
//! sanitization methods. This module defines the contract that all such
//! engines must adhere to, ensuring a consistent and interchangeable core
//! API for `mdscrub`.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;

use crate::config::{ScrubConfig, ScrubSummaryItem};
use crate::sanitizers::compiler::CompiledRules;
use crate::scrub_match::ScrubMatch;

/// A trait that defines the core functionality of a sanitization engine.
///
/// This trait decouples the high-level application logic from the specific
/// implementation of a sanitization method, allowing for different engines
/// to be used interchangeably.
pub trait SanitizationEngine: Send + Sync {
    /// Performs full sanitization on the provided content.
    ///
    /// This method applies the rule catalog, protects and restores code
    /// spans, and generates a summary of all rewrites. It returns the fully
    /// sanitized content and that summary.
    ///
    /// # Arguments
    /// * `content` - The input string to sanitize.
    /// * `source_id` - The name or identifier of the source being processed.
    fn sanitize(&self, content: &str, source_id: &str) -> Result<(String, Vec<ScrubSummaryItem>)>;

    /// Analyzes the provided content without rewriting it.
    ///
    /// This method is used specifically for the `scan` command. It returns a
    /// summary of all matched items, but the original content is not
    /// modified.
    fn analyze_for_stats(&self, content: &str, source_id: &str) -> Result<Vec<ScrubSummaryItem>>;

    /// Finds all matches with their positions, in application order.
    fn find_matches(&self, content: &str, source_id: &str) -> Result<Vec<ScrubMatch>>;

    /// Returns a reference to the `CompiledRules` used by the engine.
    ///
    /// This is used by external components, such as the scan command, to
    /// access and display information about the rules without needing to
    /// recompile them.
    fn compiled_rules(&self) -> &CompiledRules;

    /// Returns a reference to the engine's configuration.
    fn get_rules(&self) -> &ScrubConfig;
}
