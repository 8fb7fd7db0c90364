//! Status message functions for terminal output.

use owo_colors::{OwoColorize, Style};

use super::{colors_enabled, is_quiet};

fn emit(symbol: &str, style: Style, message: &str) {
    if colors_enabled() {
        eprintln!("{} {}", symbol.style(style), message);
    } else {
        eprintln!("{} {}", symbol, message);
    }
}

/// Print a success message to stderr.
pub fn success(message: &str) {
    if !is_quiet() {
        emit("✓", Style::new().green().bold(), message);
    }
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    if !is_quiet() {
        emit("ℹ", Style::new().blue().bold(), message);
    }
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    if !is_quiet() {
        emit("⚠", Style::new().yellow().bold(), message);
    }
}

/// Print an error message to stderr. Shown even in quiet mode.
pub fn error(message: &str) {
    emit("✗", Style::new().red().bold(), message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_messages() {
        success("Success message");
        info("Info message");
        warning("Warning message");
        error("Error message");
    }
}
