//! filenames.rs - Filesystem-safe name sanitization for export callers.
//!
//! Callers that write sanitized documents to disk name the output after
//! user-controlled strings (channel titles and the like). This module keeps
//! those names portable across filesystems.
//!
//! License: MIT OR Apache-2.0

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters rejected by at least one mainstream filesystem.
static INVALID_FILENAME_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[<>:"/\\|?*]"#).unwrap());

/// Maximum filename length before truncation.
const MAX_FILENAME_LENGTH: usize = 100;

/// Replaces filesystem-unsafe characters with `_` and caps the length,
/// appending `...` when truncated.
pub fn sanitize_filename(filename: &str) -> String {
    let sanitized = INVALID_FILENAME_CHARS.replace_all(filename, "_");
    if sanitized.chars().count() > MAX_FILENAME_LENGTH {
        let truncated: String = sanitized.chars().take(MAX_FILENAME_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        sanitized.into_owned()
    }
}
