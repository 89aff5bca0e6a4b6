// BVDL Library - Public API

// Re-export error types
pub mod error;
pub use error::{BvdlError, Result};

// Module declarations
pub mod cli;
pub mod commands;
pub mod core;
pub mod platform;
pub mod ui;

// Re-export commonly used types
pub use crate::core::config::Settings;

// Initialize logging
//
// RUST_LOG, when set, overrides the level chosen from the --debug flag.
pub fn init_logging(debug: bool) {
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
