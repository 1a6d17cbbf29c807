// Command handlers module
pub mod status;

// Re-exports for cleaner imports
pub use status::execute as status;
