// mdscrub-core/src/lib.rs
//! # mdscrub Core Library
//!
//! `mdscrub-core` provides the fundamental, platform-independent logic for
//! making arbitrary user-authored message text safe to embed in a Markdown
//! document consumed by downstream renderers (editors, KaTeX-aware viewers).
//! It defines the core data structures for scrub rules, provides mechanisms
//! for compiling these rules, and implements a pluggable `SanitizationEngine`
//! trait for applying the transformation pipeline.
//!
//! The library is designed to be pure and stateless, focusing solely on the
//! transformation of input text based on defined rules, without concerns for
//! I/O or application-specific state management.
//!
//! ## Modules
//!
//! * `config`: Defines `ScrubRule`s and `ScrubConfig` for specifying the ordered rule catalog.
//! * `sanitizers`: Contains the rule compiler, which turns a config into `CompiledRules`.
//! * `protect`: Code-span protection via collision-free placeholder tokens.
//! * `scrub_match`: Defines data structures for detailed reporting of rewrites.
//! * `engine`: Defines the `SanitizationEngine` trait, enabling a modular design.
//! * `engines`: Contains the concrete `MarkdownEngine` implementation.
//! * `headless`: Convenience wrappers for one-shot, non-interactive use.
//! * `filenames`: Filesystem-safe name sanitization for export callers.
//!
//! ## Usage Example
//!
//! ```rust
//! use mdscrub_core::sanitize;
//!
//! // Targeted escapes are rewritten; Markdown markup passes through.
//! let out = sanitize("run `find` with \\-mtime \\+30 on **all** dirs");
//! assert_eq!(out, "run `find` with -mtime +30 on **all** dirs");
//! ```
//!
//! ## Pipeline ordering
//!
//! `sanitize(text) = restore(protect(normalize(text)))`. The rule catalog is
//! applied to the raw text first, the result is trimmed, and only then are
//! fenced and inline code spans detected and tokenized. Fenced blocks are
//! consumed before inline spans. These orderings are behavioral contracts
//! covered by the integration tests, not incidental implementation order.
//!
//! ## Error Handling
//!
//! The library uses `anyhow::Error` for fallible configuration operations and
//! defines `MdscrubError` for rule-compilation failures. The `sanitize`
//! operation itself is total: every string input, including the empty string
//! and text with unbalanced code fences, produces a well-defined output.
//!
//! ## Design Principles
//!
//! * **Pluggable Architecture:** The `SanitizationEngine` trait allows
//!   alternative pipelines to be swapped in seamlessly.
//! * **Stateless:** The core library does not maintain application state;
//!   the only process-wide state is the compiled-rule cache.
//! * **Testable:** Logic is easily unit-testable in isolation.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod filenames;
pub mod headless;
pub mod protect;
pub mod sanitizers;
pub mod scrub_match;

/// Re-exports the public configuration types and functions for managing scrub rules.
pub use config::{merge_rules, ScrubConfig, ScrubRule, ScrubSummaryItem, MAX_PATTERN_LENGTH};

/// Re-exports the custom error type for clear error reporting.
pub use errors::MdscrubError;

/// Re-exports types related to the core sanitization engine trait.
pub use engine::SanitizationEngine;

/// Re-exports the concrete `MarkdownEngine` implementation.
pub use engines::markdown_engine::MarkdownEngine;

/// Re-exports code-span protection primitives.
pub use protect::{protect, restore, ProtectedSpan};

/// Re-exports the rewrite record type.
pub use scrub_match::ScrubMatch;

/// Re-exports filesystem-safe name sanitization.
pub use filenames::sanitize_filename;

/// Re-exports functions for one-shot, non-interactive use.
pub use headless::{headless_sanitize_string, sanitize};

/// Re-exports key types from the sanitizers::compiler module for advanced usage.
pub use sanitizers::compiler::{compile_rules, CompiledRule, CompiledRules};
