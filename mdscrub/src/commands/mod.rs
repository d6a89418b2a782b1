// mdscrub/src/commands/mod.rs
//! Command implementations for the mdscrub CLI.

pub mod scrub;
