//! Splitting a generated commit message into title and description.

use std::fmt;

/// A commit message as shown in the review step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedMessage {
    pub title: String,
    pub description: String,
}

impl GeneratedMessage {
    /// Split a raw provider response at its first newline.
    ///
    /// Both halves are trimmed. A response without a newline is all title.
    pub fn parse(raw: &str) -> Self {
        let (title, description) = raw.split_once('\n').unwrap_or((raw, ""));
        Self {
            title: title.trim().to_string(),
            description: description.trim().to_string(),
        }
    }

    /// The message handed to `git commit -m`.
    pub fn format(&self) -> String {
        format!("{}\n\n{}", self.title, self.description)
    }
}

impl fmt::Display for GeneratedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}
