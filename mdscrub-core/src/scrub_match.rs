//! Provides core data structures and utility functions for recording scrub
//! matches within the `mdscrub-core` library.

use log::debug;
use serde::{Deserialize, Serialize};

/// Represents a single instance of a matched and rewritten string.
///
/// Offsets are byte positions in the text as the owning rule saw it; because
/// rules run in catalog order, later rules report offsets into the partially
/// rewritten text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ScrubMatch {
    pub rule_name: String,
    pub original_string: String,
    pub sanitized_string: String,
    pub start: u64,
    pub end: u64,
}

pub fn log_scrub_match_debug(module_path: &str, rule_name: &str, original: &str, sanitized: &str) {
    debug!(
        "{} Found ScrubMatch: Rule='{}', Original='{}', Sanitized='{}'",
        module_path, rule_name, original, sanitized
    );
}
