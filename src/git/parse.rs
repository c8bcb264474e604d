//! Parsers for line-oriented git output.

use tracing::warn;

/// A single entry from `git log --pretty=format:%h|%s|%an|%ar`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub hash: String,
    pub message: String,
    pub author: String,
    /// Relative commit time as printed by git (e.g. "2 hours ago").
    pub time: String,
}

/// Local branches plus the one currently checked out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Branches {
    pub all: Vec<String>,
    pub current: Option<String>,
}

/// Extract file paths from `git status --short` output.
///
/// Each line is `XY path`: two status flags, a space, then the path. Lines that
/// are blank or too short to hold a path are skipped.
pub fn parse_status_files(status: &str) -> Vec<String> {
    status
        .lines()
        .filter(|line| line.trim().len() > 3)
        .filter_map(|line| line.get(2..))
        .map(|path| path.trim().to_string())
        .collect()
}

/// Parse `git branch` output.
pub fn parse_branches(output: &str) -> Branches {
    let mut branches = Branches::default();

    for line in output.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match trimmed.strip_prefix("* ") {
            Some(current) => {
                let current = current.trim().to_string();
                branches.all.push(current.clone());
                branches.current = Some(current);
            }
            None => branches.all.push(trimmed.to_string()),
        }
    }

    branches
}

/// Parse pipe-delimited `git log` output into commit entries.
pub fn parse_log(output: &str) -> Vec<CommitInfo> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let parts: Vec<&str> = line.split('|').collect();
            if parts.len() < 4 {
                warn!("Skipping malformed log line: {}", line);
                return None;
            }
            Some(CommitInfo {
                hash: parts[0].to_string(),
                message: parts[1].to_string(),
                author: parts[2].to_string(),
                time: parts[3].to_string(),
            })
        })
        .collect()
}
