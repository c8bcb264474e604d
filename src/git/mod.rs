//! Repository adapter: shells out to the system `git` binary.

pub mod cli;
pub mod parse;

use std::path::PathBuf;

use crate::error::GitError;

pub use cli::GitCli;
pub use parse::{Branches, CommitInfo, parse_branches, parse_log, parse_status_files};

/// Version-control operations used by the commands and the commit workflow.
///
/// This abstraction allows mocking the git subprocess in tests.
#[cfg_attr(test, mockall::automock)]
pub trait Vcs: Send + Sync {
    /// Long-form `git status` output.
    fn status(&self) -> Result<String, GitError>;

    /// `git status --short` output, one entry per line.
    fn status_short(&self) -> Result<String, GitError>;

    /// Difference between the index and HEAD. Empty when nothing is staged.
    fn diff_staged(&self) -> Result<String, GitError>;

    fn add(&self, path: &str) -> Result<(), GitError>;

    fn commit(&self, message: &str) -> Result<(), GitError>;

    fn push(&self) -> Result<(), GitError>;

    fn pull(&self) -> Result<(), GitError>;

    fn branches(&self) -> Result<Branches, GitError>;

    fn checkout(&self, branch: &str) -> Result<(), GitError>;

    /// The most recent `limit` commits, newest first.
    fn log(&self, limit: usize) -> Result<Vec<CommitInfo>, GitError>;

    fn is_repo(&self) -> bool;

    /// Absolute path of the working tree root.
    fn repo_root(&self) -> Result<PathBuf, GitError>;
}
