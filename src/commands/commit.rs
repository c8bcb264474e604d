//! `commit` and `sync`.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use crate::commit::{CommitOutcome, CommitWorkflow, PushStatus, SyncOutcome};
use crate::config::{Config, RepoConfig};
use crate::git::Vcs;
use crate::ui::{Prompter, style};

/// Repository override for the current working tree, if any.
fn repo_config<V: Vcs + ?Sized>(vcs: &V) -> Result<Option<RepoConfig>> {
    let root = vcs.repo_root()?;
    let repo = RepoConfig::load(&root).context("Failed to read repository config")?;
    if repo.is_some() {
        debug!("Using repository override from {}", root.display());
    }
    Ok(repo)
}

fn committed_line(message: &str) -> String {
    let title = message.lines().next().unwrap_or_default();
    style::success(&format!("Committed: {title}"))
}

pub async fn commit<V, P>(vcs: Arc<V>, prompter: &P, config: &Config) -> Result<()>
where
    V: Vcs + 'static,
    P: Prompter,
{
    let repo = repo_config(vcs.as_ref())?;
    let workflow = CommitWorkflow::new(vcs, prompter, config, repo.as_ref());

    match workflow.run().await? {
        CommitOutcome::Committed { message } => println!("{}", committed_line(&message)),
        CommitOutcome::Cancelled => println!("{}", style::subtle("Commit cancelled.")),
    }
    Ok(())
}

/// Commit, then push on confirmation. A failed push keeps the commit.
pub async fn sync<V, P>(vcs: Arc<V>, prompter: &P, config: &Config) -> Result<()>
where
    V: Vcs + 'static,
    P: Prompter,
{
    let repo = repo_config(vcs.as_ref())?;
    let workflow = CommitWorkflow::new(vcs, prompter, config, repo.as_ref());

    let (message, push) = match workflow.sync().await? {
        SyncOutcome::Committed { message, push } => (message, push),
        SyncOutcome::Cancelled => {
            println!("{}", style::subtle("Sync cancelled."));
            return Ok(());
        }
    };

    println!("{}", committed_line(&message));
    match push {
        PushStatus::Pushed => println!("{}", style::success("Pushed")),
        PushStatus::Declined => println!("{}", style::subtle("Skipped push.")),
        PushStatus::Interrupted => println!("{}", style::subtle("Push interrupted.")),
        PushStatus::Failed(e) => {
            return Err(e).context("Commit created, but push failed");
        }
    }
    Ok(())
}
