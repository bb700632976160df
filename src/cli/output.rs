//! Styling helpers for shell messages. Colors degrade to plain text when
//! output is not a terminal, so piped sessions and tests see bare strings.

use colored::Colorize;

/// Text for a rejected operation.
pub fn error_text(message: &str) -> String {
    message.red().to_string()
}

/// Text for an invalid-input reprompt.
pub fn warning_text(message: &str) -> String {
    message.yellow().to_string()
}
