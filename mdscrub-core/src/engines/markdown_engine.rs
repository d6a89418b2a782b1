// mdscrub-core/src/engines/markdown_engine.rs
//! A `SanitizationEngine` implementation that makes user-authored message
//! text safe to embed in a Markdown document.
//!
//! The pipeline has a fixed stage order, which is a behavioral contract:
//!
//! 1. apply the scrub rules in catalog order to the raw text;
//! 2. trim leading/trailing whitespace;
//! 3. protect fenced and inline code spans behind placeholder tokens;
//! 4. restore the spans verbatim.
//!
//! Rules run before code-span detection, so a targeted escape inside a code
//! span is rewritten before the span becomes protected; whatever remains
//! after normalization is what gets preserved verbatim. No rule may run
//! between protect and restore.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::debug;

use crate::config::{ScrubConfig, ScrubRule, ScrubSummaryItem};
use crate::engine::SanitizationEngine;
use crate::protect::{protect, restore};
use crate::sanitizers::compiler::{get_or_compile_rules, CompiledRule, CompiledRules};
use crate::scrub_match::{log_scrub_match_debug, ScrubMatch};

#[derive(Debug)]
pub struct MarkdownEngine {
    compiled_rules: Arc<CompiledRules>,
    config: ScrubConfig,
}

impl MarkdownEngine {
    pub fn new(config: ScrubConfig) -> Result<Self> {
        let compiled_rules = get_or_compile_rules(&config)
            .context("Failed to compile scrub rules for MarkdownEngine")?;

        Ok(Self { compiled_rules, config })
    }

    /// Expands `$1`-style capture references in a rule's replacement string.
    fn expand_replacement(compiled_rule: &CompiledRule, caps: &regex::Captures) -> String {
        let mut replacement = compiled_rule.replace_with.clone();
        for i in 1..caps.len() {
            if let Some(group) = caps.get(i) {
                replacement = replacement.replace(&format!("${}", i), group.as_str());
            }
        }
        replacement
    }

    /// Applies every enabled rule in catalog order, recording each rewrite.
    ///
    /// Later rules operate on the text produced by earlier ones, matching the
    /// documented ordering contract of the rule catalog.
    fn apply_rules(&self, content: &str, source_id: &str) -> (String, Vec<ScrubMatch>) {
        let rule_configs: HashMap<&str, &ScrubRule> = self
            .config
            .rules
            .iter()
            .map(|rule| (rule.name.as_str(), rule))
            .collect();

        let mut text = content.to_string();
        let mut matches: Vec<ScrubMatch> = Vec::new();

        for compiled_rule in &self.compiled_rules.rules {
            if let Some(rule_config) = rule_configs.get(compiled_rule.name.as_str()) {
                if let Some(false) = rule_config.enabled {
                    continue;
                }
            }

            let mut rule_matches: Vec<ScrubMatch> = Vec::new();
            for caps in compiled_rule.regex.captures_iter(&text) {
                // The full match is group 0, which always exists.
                if let Some(original) = caps.get(0) {
                    let replacement = Self::expand_replacement(compiled_rule, &caps);
                    log_scrub_match_debug(
                        module_path!(),
                        &compiled_rule.name,
                        original.as_str(),
                        &replacement,
                    );
                    rule_matches.push(ScrubMatch {
                        rule_name: compiled_rule.name.clone(),
                        original_string: original.as_str().to_string(),
                        sanitized_string: replacement,
                        start: original.start() as u64,
                        end: original.end() as u64,
                    });
                }
            }

            // Splice the recorded replacements back in, so the emitted text
            // and the reported rewrites always agree. A literal `$` in a
            // replacement stays literal; only `$N` for existing capture
            // groups is expanded.
            if !rule_matches.is_empty() {
                let mut rewritten = String::with_capacity(text.len());
                let mut last_end = 0usize;
                for m in &rule_matches {
                    rewritten.push_str(&text[last_end..m.start as usize]);
                    rewritten.push_str(&m.sanitized_string);
                    last_end = m.end as usize;
                }
                rewritten.push_str(&text[last_end..]);
                text = rewritten;
                matches.append(&mut rule_matches);
            }
        }

        debug!(
            "Applied {} rule(s) to '{}': {} rewrite(s).",
            self.compiled_rules.rules.len(),
            source_id,
            matches.len()
        );
        (text, matches)
    }

    /// Groups recorded matches into per-rule summary items, preserving rule
    /// application order.
    fn summarize(matches: &[ScrubMatch]) -> Vec<ScrubSummaryItem> {
        let mut summary: Vec<ScrubSummaryItem> = Vec::new();
        for m in matches {
            match summary.iter_mut().find(|item| item.rule_name == m.rule_name) {
                Some(item) => {
                    item.occurrences += 1;
                    item.original_texts.push(m.original_string.clone());
                    item.sanitized_texts.push(m.sanitized_string.clone());
                }
                None => summary.push(ScrubSummaryItem {
                    rule_name: m.rule_name.clone(),
                    occurrences: 1,
                    original_texts: vec![m.original_string.clone()],
                    sanitized_texts: vec![m.sanitized_string.clone()],
                }),
            }
        }
        summary
    }
}

impl SanitizationEngine for MarkdownEngine {
    fn sanitize(&self, content: &str, source_id: &str) -> Result<(String, Vec<ScrubSummaryItem>)> {
        if content.is_empty() {
            return Ok((String::new(), Vec::new()));
        }

        let (rewritten, matches) = self.apply_rules(content, source_id);
        let trimmed = rewritten.trim();

        // Detection runs on the already-normalized text. Nothing rewrites the
        // masked text between protect and restore; the placeholder pass exists
        // so the span content stays opaque to any such stage.
        let (masked, spans) = protect(trimmed);
        let restored = restore(&masked, &spans);

        Ok((restored, Self::summarize(&matches)))
    }

    fn analyze_for_stats(&self, content: &str, source_id: &str) -> Result<Vec<ScrubSummaryItem>> {
        let (_, matches) = self.apply_rules(content, source_id);
        Ok(Self::summarize(&matches))
    }

    fn find_matches(&self, content: &str, source_id: &str) -> Result<Vec<ScrubMatch>> {
        let (_, matches) = self.apply_rules(content, source_id);
        Ok(matches)
    }

    fn compiled_rules(&self) -> &CompiledRules {
        &self.compiled_rules
    }

    fn get_rules(&self) -> &ScrubConfig {
        &self.config
    }
}
