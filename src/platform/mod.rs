// Platform-specific code module

pub mod fs;

// Re-exports para imports limpios
pub use fs::{is_hidden, is_illegal_name_char, ILLEGAL_NAME_CHARS};
