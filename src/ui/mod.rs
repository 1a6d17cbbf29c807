// UI and formatting module

pub mod gradient;

// Re-export commonly used items for cleaner imports
pub use gradient::{colorize, ColorChoice, ColorProfile, ColorTier, MetricReading, Polarity};
