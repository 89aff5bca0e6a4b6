// Command handlers module
pub mod download;

// Re-exports for cleaner imports
pub use download::execute as download;
