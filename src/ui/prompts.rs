// UI prompts and user interaction module

use colored::Colorize;

use super::input::{InputEvent, LineSource};

/// Interpret a yes/no answer; an empty answer takes `default`.
///
/// Returns `None` for anything unrecognized so the caller can ask again.
pub fn parse_yes_no(input: &str, default: bool) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Ask a yes/no question until it gets a recognizable answer.
///
/// Ctrl+C and end of input count as "no".
pub fn confirm(input: &mut dyn LineSource, message: &str, default: bool) -> bool {
    let hint = if default { "(Y/n)" } else { "(y/N)" };
    let prompt = format!("{} {}: ", message, hint);

    loop {
        match input.read_line(&prompt) {
            InputEvent::Line(line) => match parse_yes_no(&line, default) {
                Some(answer) => return answer,
                None => warn_plain("Please answer y or n"),
            },
            InputEvent::Eof | InputEvent::Interrupted => return false,
        }
    }
}

/// Section banner
pub fn header(title: &str) {
    println!();
    println!("{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".cyan());
    println!("{}", format!("  {}", title).cyan().bold());
    println!("{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".cyan());
    println!();
}

/// Display a warning message
pub fn warn(message: &str) {
    println!("{}", format!("⚠️  Warning: {}", message).yellow().bold());
}

/// Display a yellow hint without the warning prefix
pub fn warn_plain(message: &str) {
    println!("{}", message.yellow());
}

/// Display an info message
pub fn info(message: &str) {
    println!("{}", message.cyan());
}

/// Display a success message
pub fn success(message: &str) {
    println!("{}", format!("✓ {}", message).green().bold());
}

/// Display an error message
pub fn error(message: &str) {
    println!("{}", format!("✗ {}", message).red().bold());
}

/// Display a bold white message
pub fn bold(message: &str) {
    println!("{}", message.white().bold());
}

/// Display a dimmed/secondary message
pub fn dimmed(message: &str) {
    println!("{}", message.dimmed());
}
