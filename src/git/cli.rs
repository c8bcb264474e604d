//! `git` subprocess invocation.
//!
//! All operations use `std::process::Command` to shell out to the system `git`
//! binary, inheriting the user's existing git config, SSH agent, and credential store.
//! Calls are blocking, single-shot, and never retried.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::GitError;

use super::Vcs;
use super::parse::{Branches, CommitInfo, parse_branches, parse_log};

/// Runs `git` in a fixed working directory (or the process cwd).
#[derive(Debug, Clone, Default)]
pub struct GitCli {
    workdir: Option<PathBuf>,
}

impl GitCli {
    /// Run git in the current working directory.
    pub fn new() -> Self {
        Self { workdir: None }
    }

    /// Run git inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            workdir: Some(dir.as_ref().to_path_buf()),
        }
    }

    /// Run a git command and return its stdout, or a descriptive error.
    fn run_git(&self, args: &[&str]) -> Result<String, GitError> {
        let command = args.first().copied().unwrap_or_default().to_string();
        debug!("git {}", args.join(" "));

        let mut cmd = Command::new("git");
        cmd.args(args);
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }

        let output = cmd
            .output()
            .map_err(|source| GitError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(GitError::CommandFailed {
                command,
                code: output.status.code(),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl Vcs for GitCli {
    fn status(&self) -> Result<String, GitError> {
        self.run_git(&["status"])
    }

    fn status_short(&self) -> Result<String, GitError> {
        self.run_git(&["status", "--short"])
    }

    fn diff_staged(&self) -> Result<String, GitError> {
        self.run_git(&["diff", "--staged"])
    }

    fn add(&self, path: &str) -> Result<(), GitError> {
        self.run_git(&["add", path]).map(|_| ())
    }

    fn commit(&self, message: &str) -> Result<(), GitError> {
        self.run_git(&["commit", "-m", message]).map(|_| ())
    }

    fn push(&self) -> Result<(), GitError> {
        self.run_git(&["push"]).map(|_| ())
    }

    fn pull(&self) -> Result<(), GitError> {
        self.run_git(&["pull"]).map(|_| ())
    }

    fn branches(&self) -> Result<Branches, GitError> {
        self.run_git(&["branch"]).map(|out| parse_branches(&out))
    }

    fn checkout(&self, branch: &str) -> Result<(), GitError> {
        self.run_git(&["checkout", branch]).map(|_| ())
    }

    fn log(&self, limit: usize) -> Result<Vec<CommitInfo>, GitError> {
        let count = format!("-n{limit}");
        self.run_git(&["log", &count, "--pretty=format:%h|%s|%an|%ar"])
            .map(|out| parse_log(&out))
    }

    fn is_repo(&self) -> bool {
        self.run_git(&["rev-parse", "--is-inside-work-tree"]).is_ok()
    }

    fn repo_root(&self) -> Result<PathBuf, GitError> {
        match self.run_git(&["rev-parse", "--show-toplevel"]) {
            Ok(out) => Ok(PathBuf::from(out.trim())),
            Err(GitError::CommandFailed { .. }) => Err(GitError::NotARepository),
            Err(e) => Err(e),
        }
    }
}
