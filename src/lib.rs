// adb-statusline library - public API

// Re-export error types
pub mod error;
pub use error::{Result, StatusError};

// Module declarations
pub mod commands;
pub mod core;
pub mod ui;

// Re-export commonly used types
pub use crate::core::config::Config;

/// Initialize logging on stderr.
///
/// Defaults to warnings only so a status bar never picks up chatter; each
/// `-v` raises the level and `RUST_LOG` still overrides everything.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
