//! protect.rs - Code-span protection via placeholder tokenization.
//!
//! Detects fenced and inline code regions in Markdown text, swaps each for an
//! opaque placeholder token, and restores the original content verbatim once
//! the surrounding text has been finalized. Fenced blocks are consumed before
//! inline spans so the inline scanner never fires inside an already-matched
//! fence.
//!
//! Placeholders are `<prefix><counter><suffix>` where the counter starts at 0
//! and is local to one `protect` call. The prefix is validated against the raw
//! input up front: if the input already contains a placeholder-shaped
//! substring, the prefix is extended deterministically until no collision
//! remains, so protection is total and restoration can never splice a
//! placeholder into another span's resolved content.
//!
//! License: MIT OR Apache-2.0

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Base prefix for placeholder tokens. Extended with `X` on collision.
const PLACEHOLDER_PREFIX: &str = "MDCODEBLOCK";
/// Fixed suffix for placeholder tokens.
const PLACEHOLDER_SUFFIX: &str = "PLACEHOLDER";

/// A fenced code block: three backticks to the next three backticks,
/// non-greedy, possibly spanning multiple lines.
static FENCED_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```.*?```").unwrap());

/// An inline code span: single backticks around one or more non-backtick,
/// non-newline characters. Unterminated spans are not matched.
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`[^`\n]+`").unwrap());

/// A record of one detected code span: the verbatim original text and the
/// placeholder standing in for it. Created during protection, consumed
/// exactly once during restoration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedSpan {
    pub original: String,
    pub placeholder: String,
}

/// Returns true if `text` contains `<prefix><digits><suffix>` anywhere.
fn contains_placeholder_shaped(text: &str, prefix: &str) -> bool {
    let mut rest = text;
    while let Some(idx) = rest.find(prefix) {
        let after = &rest[idx + prefix.len()..];
        let digits = after.chars().take_while(|c| c.is_ascii_digit()).count();
        if digits > 0 && after[digits..].starts_with(PLACEHOLDER_SUFFIX) {
            return true;
        }
        rest = &rest[idx + 1..];
    }
    false
}

/// Picks a placeholder prefix guaranteed not to collide with `text`.
fn unique_prefix(text: &str) -> String {
    let mut prefix = PLACEHOLDER_PREFIX.to_string();
    while contains_placeholder_shaped(text, &prefix) {
        prefix.push('X');
    }
    prefix
}

/// Replaces fenced code blocks, then inline code spans, with collision-free
/// placeholder tokens. Returns the masked text and the spans in detection
/// order (ascending counter).
pub fn protect(text: &str) -> (String, Vec<ProtectedSpan>) {
    let prefix = unique_prefix(text);
    let mut spans: Vec<ProtectedSpan> = Vec::new();

    // Fenced blocks first, so the inline scanner never sees their backticks.
    let masked = FENCED_CODE.replace_all(text, |caps: &regex::Captures| {
        let placeholder = format!("{}{}{}", prefix, spans.len(), PLACEHOLDER_SUFFIX);
        spans.push(ProtectedSpan {
            original: caps[0].to_string(),
            placeholder: placeholder.clone(),
        });
        placeholder
    });

    let masked = INLINE_CODE.replace_all(&masked, |caps: &regex::Captures| {
        let placeholder = format!("{}{}{}", prefix, spans.len(), PLACEHOLDER_SUFFIX);
        spans.push(ProtectedSpan {
            original: caps[0].to_string(),
            placeholder: placeholder.clone(),
        });
        placeholder
    });

    debug!("Protected {} code span(s).", spans.len());
    (masked.into_owned(), spans)
}

/// Restores each placeholder to its original verbatim text, in the order the
/// spans were generated. Exactly one occurrence is replaced per placeholder.
pub fn restore(masked: &str, spans: &[ProtectedSpan]) -> String {
    let mut restored = masked.to_string();
    for span in spans {
        restored = restored.replacen(&span.placeholder, &span.original, 1);
    }
    restored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_inline_and_fenced() {
        let input = "before `inline` middle\n```\nfenced\n```\nafter";
        let (masked, spans) = protect(input);
        assert_eq!(spans.len(), 2);
        assert!(!masked.contains('`'));
        assert_eq!(restore(&masked, &spans), input);
    }

    #[test]
    fn test_fenced_consumed_before_inline() {
        let input = "```\na `looks inline` b\n```";
        let (masked, spans) = protect(input);
        // The whole fence is one span; the inline scanner must not re-split it.
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].original, input);
        assert_eq!(restore(&masked, &spans), input);
    }

    #[test]
    fn test_unterminated_fence_not_matched() {
        let input = "```\nno closing fence";
        let (masked, spans) = protect(input);
        assert!(spans.is_empty());
        assert_eq!(masked, input);
    }

    #[test]
    fn test_placeholder_shaped_input_gets_longer_prefix() {
        let input = "prose MDCODEBLOCK0PLACEHOLDER with `code`";
        let (masked, spans) = protect(input);
        assert_eq!(spans.len(), 1);
        assert!(spans[0].placeholder.starts_with("MDCODEBLOCKX"));
        // The pre-existing fake token must survive untouched.
        assert_eq!(restore(&masked, &spans), input);
    }

    #[test]
    fn test_counter_shared_across_scans() {
        let input = "```a``` and `b` and `c`";
        let (_, spans) = protect(input);
        let placeholders: Vec<&str> = spans.iter().map(|s| s.placeholder.as_str()).collect();
        assert_eq!(
            placeholders,
            vec![
                "MDCODEBLOCK0PLACEHOLDER",
                "MDCODEBLOCK1PLACEHOLDER",
                "MDCODEBLOCK2PLACEHOLDER"
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        let (masked, spans) = protect("");
        assert_eq!(masked, "");
        assert!(spans.is_empty());
    }
}
