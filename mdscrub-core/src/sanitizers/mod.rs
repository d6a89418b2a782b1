//! sanitizers/mod.rs - Rule compilation for the scrub engine.
//!
//! License: MIT OR APACHE 2.0

pub mod compiler;

pub use compiler::{compile_rules, get_or_compile_rules, CompiledRule, CompiledRules};
