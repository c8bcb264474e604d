//! Thin git commands: status, add, push, pull, log, branch, init.

use std::sync::Arc;

use anyhow::{Context, Result, bail};

use crate::commit::stage_interactive;
use crate::config::{REPO_CONFIG_FILE, init_repo_config};
use crate::error::GitError;
use crate::git::Vcs;
use crate::ui::spinner::run_blocking;
use crate::ui::{Prompter, style};

pub const DEFAULT_LOG_LIMIT: usize = 10;

pub fn status<V: Vcs + ?Sized>(vcs: &V) -> Result<()> {
    print!("{}", vcs.status()?);
    Ok(())
}

/// Stage `path`, or pick files interactively when no path is given.
pub fn add<V, P>(vcs: &V, prompter: &P, path: Option<&str>) -> Result<()>
where
    V: Vcs + ?Sized,
    P: Prompter + ?Sized,
{
    if let Some(path) = path {
        vcs.add(path)?;
        println!("{}", style::success(&format!("Staged {path}")));
        return Ok(());
    }

    match stage_interactive(vcs, prompter)? {
        Some(files) => println!("{}", style::success(&format!("Staged {} file(s)", files.len()))),
        None => println!("{}", style::subtle("Nothing staged.")),
    }
    Ok(())
}

pub async fn push<V: Vcs + 'static>(vcs: Arc<V>) -> Result<()> {
    match run_blocking("Pushing...", move || vcs.push()).await? {
        Some(result) => {
            result.context("Push failed")?;
            println!("{}", style::success("Pushed"));
        }
        None => println!("{}", style::subtle("Push interrupted.")),
    }
    Ok(())
}

pub async fn pull<V: Vcs + 'static>(vcs: Arc<V>) -> Result<()> {
    match run_blocking("Pulling...", move || vcs.pull()).await? {
        Some(result) => {
            result.context("Pull failed")?;
            println!("{}", style::success("Pulled"));
        }
        None => println!("{}", style::subtle("Pull interrupted.")),
    }
    Ok(())
}

pub fn log<V: Vcs + ?Sized>(vcs: &V, limit: usize) -> Result<()> {
    for commit in vcs.log(limit)? {
        println!(
            "{} {} {}",
            style::title(&commit.hash),
            commit.message,
            style::subtle(&format!("({}, {})", commit.author, commit.time))
        );
    }
    Ok(())
}

/// Check out `name`, or pick a local branch when no name is given.
pub fn branch<V, P>(vcs: &V, prompter: &P, name: Option<&str>) -> Result<()>
where
    V: Vcs + ?Sized,
    P: Prompter + ?Sized,
{
    let target = match name {
        Some(name) => name.to_string(),
        None => {
            let branches = vcs.branches()?;
            if branches.all.is_empty() {
                bail!("No local branches yet. Make a first commit.");
            }

            let current = branches
                .current
                .as_ref()
                .and_then(|c| branches.all.iter().position(|b| b == c))
                .unwrap_or(0);

            let Some(choice) = prompter.select("Switch to branch", &branches.all, current)? else {
                return Ok(());
            };
            let Some(target) = branches.all.get(choice) else {
                return Ok(());
            };
            if branches.current.as_deref() == Some(target.as_str()) {
                println!("{}", style::subtle(&format!("Already on {target}")));
                return Ok(());
            }
            target.clone()
        }
    };

    vcs.checkout(&target)?;
    println!("{}", style::success(&format!("Switched to {target}")));
    Ok(())
}

/// Write `.ai-git.yaml` at the repository root unless it already exists.
pub fn init<V: Vcs + ?Sized>(vcs: &V, default_provider: Option<&str>) -> Result<()> {
    if !vcs.is_repo() {
        return Err(GitError::NotARepository.into());
    }
    let root = vcs.repo_root()?;

    if init_repo_config(&root, default_provider)? {
        println!("{}", style::success(&format!("Created {REPO_CONFIG_FILE}")));
    } else {
        println!(
            "{}",
            style::subtle(&format!("{REPO_CONFIG_FILE} already exists, leaving it alone."))
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::{Branches, MockVcs};
    use crate::ui::MockPrompter;

    fn branches(current: &str) -> Branches {
        Branches {
            all: vec!["feature".to_string(), "main".to_string()],
            current: Some(current.to_string()),
        }
    }

    #[test]
    fn test_branch_preselects_current_and_checks_out_choice() {
        let mut vcs = MockVcs::new();
        vcs.expect_branches().returning(|| Ok(branches("main")));
        vcs.expect_checkout()
            .withf(|b| b == "feature")
            .times(1)
            .returning(|_| Ok(()));

        let mut prompter = MockPrompter::new();
        prompter
            .expect_select()
            .withf(|_, items, default| items.len() == 2 && *default == 1)
            .returning(|_, _, _| Ok(Some(0)));

        branch(&vcs, &prompter, None).unwrap();
    }

    #[test]
    fn test_branch_on_current_is_noop() {
        let mut vcs = MockVcs::new();
        vcs.expect_branches().returning(|| Ok(branches("main")));
        vcs.expect_checkout().never();

        let mut prompter = MockPrompter::new();
        prompter.expect_select().returning(|_, _, _| Ok(Some(1)));

        branch(&vcs, &prompter, None).unwrap();
    }

    #[test]
    fn test_branch_by_name_skips_prompt() {
        let mut vcs = MockVcs::new();
        vcs.expect_checkout()
            .withf(|b| b == "release")
            .times(1)
            .returning(|_| Ok(()));

        branch(&vcs, &MockPrompter::new(), Some("release")).unwrap();
    }

    #[test]
    fn test_init_outside_repository_fails() {
        let mut vcs = MockVcs::new();
        vcs.expect_is_repo().return_const(false);

        let err = init(&vcs, None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GitError>(),
            Some(GitError::NotARepository)
        ));
    }

    #[test]
    fn test_init_writes_override_once() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_path_buf();

        let mut vcs = MockVcs::new();
        vcs.expect_is_repo().return_const(true);
        vcs.expect_repo_root().returning(move || Ok(root.clone()));

        init(&vcs, Some("gemini")).unwrap();
        std::fs::write(dir.path().join(REPO_CONFIG_FILE), "enabled_provider: ollama\n").unwrap();
        init(&vcs, Some("gemini")).unwrap();

        let content = std::fs::read_to_string(dir.path().join(REPO_CONFIG_FILE)).unwrap();
        assert_eq!(content, "enabled_provider: ollama\n");
    }

    #[test]
    fn test_add_single_path() {
        let mut vcs = MockVcs::new();
        vcs.expect_add()
            .withf(|p| p == "README.md")
            .times(1)
            .returning(|_| Ok(()));

        add(&vcs, &MockPrompter::new(), Some("README.md")).unwrap();
    }
}
