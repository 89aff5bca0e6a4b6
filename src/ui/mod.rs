// UI and user input module

pub mod input;
pub mod prompts;

// Re-export commonly used items for cleaner imports
pub use input::{InputEvent, LineSource, ScriptedInput, TerminalInput};
pub use prompts::{bold, confirm, dimmed, error, header, info, parse_yes_no, success, warn, warn_plain};
