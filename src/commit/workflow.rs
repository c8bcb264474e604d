//! The interactive commit flow: stage, generate, review, commit.
//!
//! The flow is a small state machine. Each step either moves to the next
//! state, ends the flow with a [`CommitOutcome`], or fails with a
//! [`CommitError`]. Staging is never rolled back when a later step fails.

use std::sync::Arc;

use tracing::debug;

use crate::config::{Config, RepoConfig, resolve_provider};
use crate::error::{CommitError, GitError};
use crate::git::{Vcs, parse_status_files};
use crate::provider;
use crate::ui::spinner::{run_blocking, with_spinner};
use crate::ui::{Prompter, ReviewAction};

use super::GeneratedMessage;

/// How a commit attempt ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// A commit was created with this message.
    Committed { message: String },
    /// The user backed out. Nothing was committed.
    Cancelled,
}

/// Result of the push step of a sync.
#[derive(Debug)]
pub enum PushStatus {
    Pushed,
    Declined,
    /// Ctrl-C while the push was running.
    Interrupted,
    /// The push failed. The commit is kept.
    Failed(GitError),
}

/// How a sync ended when it did not fail.
#[derive(Debug)]
pub enum SyncOutcome {
    Cancelled,
    Committed { message: String, push: PushStatus },
}

#[derive(Debug)]
enum State {
    CheckStaged,
    StageInteractive,
    Generating { diff: String },
    Reviewing { message: GeneratedMessage },
    Committing { message: GeneratedMessage },
}

/// Let the user pick changed files and stage them one by one.
///
/// Returns the staged paths, or `None` when the user picked nothing or
/// interrupted the prompt. Fails with [`CommitError::NoChanges`] when the
/// working tree is clean. The first failing `git add` aborts the loop.
pub fn stage_interactive<V, P>(vcs: &V, prompter: &P) -> Result<Option<Vec<String>>, CommitError>
where
    V: Vcs + ?Sized,
    P: Prompter + ?Sized,
{
    let files = parse_status_files(&vcs.status_short()?);
    if files.is_empty() {
        return Err(CommitError::NoChanges);
    }

    let selected = match prompter.select_files(&files)? {
        Some(selected) if !selected.is_empty() => selected,
        _ => return Ok(None),
    };

    for file in &selected {
        vcs.add(file)?;
        debug!("Staged {}", file);
    }

    Ok(Some(selected))
}

/// Drives one commit (and optionally a push) against a repository.
pub struct CommitWorkflow<'a, V, P> {
    vcs: Arc<V>,
    prompter: &'a P,
    config: &'a Config,
    repo_config: Option<&'a RepoConfig>,
}

impl<'a, V, P> CommitWorkflow<'a, V, P>
where
    V: Vcs + 'static,
    P: Prompter,
{
    pub fn new(
        vcs: Arc<V>,
        prompter: &'a P,
        config: &'a Config,
        repo_config: Option<&'a RepoConfig>,
    ) -> Self {
        Self {
            vcs,
            prompter,
            config,
            repo_config,
        }
    }

    /// Run the flow until it commits, is cancelled, or fails.
    pub async fn run(&self) -> Result<CommitOutcome, CommitError> {
        let mut state = State::CheckStaged;

        loop {
            debug!("Commit workflow state: {:?}", state);

            state = match state {
                State::CheckStaged => {
                    let diff = self.vcs.diff_staged()?;
                    if diff.trim().is_empty() {
                        State::StageInteractive
                    } else {
                        State::Generating { diff }
                    }
                }

                State::StageInteractive => {
                    if stage_interactive(self.vcs.as_ref(), self.prompter)?.is_none() {
                        return Ok(CommitOutcome::Cancelled);
                    }
                    State::Generating {
                        diff: self.vcs.diff_staged()?,
                    }
                }

                State::Generating { diff } => match self.generate(&diff).await? {
                    Some(message) => State::Reviewing { message },
                    None => return Ok(CommitOutcome::Cancelled),
                },

                State::Reviewing { message } => match self.prompter.review(&message)? {
                    ReviewAction::Commit => State::Committing { message },
                    ReviewAction::Edit => State::Reviewing {
                        message: self.prompter.edit_message(&message)?,
                    },
                    ReviewAction::Cancel => return Ok(CommitOutcome::Cancelled),
                },

                State::Committing { message } => {
                    let message = message.format();
                    self.vcs.commit(&message)?;
                    return Ok(CommitOutcome::Committed { message });
                }
            };
        }
    }

    /// Commit, then offer to push.
    pub async fn sync(&self) -> Result<SyncOutcome, CommitError> {
        let message = match self.run().await? {
            CommitOutcome::Committed { message } => message,
            CommitOutcome::Cancelled => return Ok(SyncOutcome::Cancelled),
        };

        if self.prompter.confirm("Push changes?", true)? != Some(true) {
            return Ok(SyncOutcome::Committed {
                message,
                push: PushStatus::Declined,
            });
        }

        let vcs = Arc::clone(&self.vcs);
        let push = match run_blocking("Pushing...", move || vcs.push()).await? {
            Some(Ok(())) => PushStatus::Pushed,
            Some(Err(e)) => PushStatus::Failed(e),
            None => PushStatus::Interrupted,
        };

        Ok(SyncOutcome::Committed { message, push })
    }

    /// Ask the configured provider for a message. `None` on Ctrl-C.
    async fn generate(&self, diff: &str) -> Result<Option<GeneratedMessage>, CommitError> {
        let resolved = resolve_provider(self.config, self.repo_config)?;
        let provider = provider::select(
            &resolved.name,
            &resolved.config,
            &resolved.model,
            &self.config.system_prompt,
            &self.config.commit_prompt_template,
        )
        .ok_or_else(|| CommitError::UnknownProvider(resolved.name.clone()))?;

        debug!(
            "Generating with {} ({} diff bytes)",
            provider.kind(),
            diff.len()
        );

        let spinner_message = format!("Generating commit message with {}...", provider.kind());
        match with_spinner(&spinner_message, provider.generate(diff, "")).await {
            Some(raw) => Ok(Some(GeneratedMessage::parse(&raw?))),
            None => Ok(None),
        }
    }
}
