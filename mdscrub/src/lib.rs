// mdscrub/src/lib.rs
//! # mdscrub CLI Application
//!
//! This crate provides the command-line interface for the mdscrub
//! sanitization engine: pipe glue around `mdscrub-core` for sanitizing
//! files or stdin before embedding them in Markdown documents.

pub mod cli;
pub mod commands;
pub mod logger;
