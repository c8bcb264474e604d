//! Terminal styles for command output.

use console::style;

pub fn title(text: &str) -> String {
    style(text).bold().cyan().to_string()
}

pub fn success(text: &str) -> String {
    style(format!("✓ {text}")).green().to_string()
}

pub fn failure(text: &str) -> String {
    style(format!("✗ {text}")).red().to_string()
}

/// Runtime error line printed before exiting with status 1.
pub fn error(text: &str) -> String {
    format!("{} {}", style("Error:").red().bold(), style(text).red())
}

pub fn subtle(text: &str) -> String {
    style(text).dim().to_string()
}

/// A doctor-style check line.
pub fn check(passed: bool, label: &str) -> String {
    if passed { success(label) } else { failure(label) }
}
