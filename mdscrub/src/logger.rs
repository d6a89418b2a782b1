// mdscrub/src/logger.rs
//! Logging setup for the mdscrub CLI.

use env_logger::Builder;
use log::LevelFilter;

/// Initializes env_logger. An explicit level overrides `RUST_LOG`; `None`
/// keeps whatever the environment configured.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_default_env();
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.format_timestamp(None);
    // try_init so tests that touch the logger more than once don't panic.
    let _ = builder.try_init();
}
