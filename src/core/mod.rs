// Core business logic module

pub mod bridge;
pub mod config;
pub mod extractor;
pub mod statusline;

// Re-export commonly used items
pub use bridge::{Adb, DeviceBridge};
pub use config::Config;
pub use statusline::{render_line, Metric, RenderOptions};
