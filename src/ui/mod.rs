//! Interactive terminal prompts.
//!
//! The commit workflow and commands talk to the user through [`Prompter`], so
//! tests can script the answers. [`TerminalPrompter`] is the dialoguer-backed
//! implementation used by the binary.
//!
//! Every prompt returns `Ok(None)` when the user interrupts it (Esc, `q`, or
//! Ctrl-C); callers decide what an interrupted prompt means.

pub mod spinner;
pub mod style;

use std::io;

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Password, Select};

use crate::commit::GeneratedMessage;
use crate::error::PromptError;

/// Choice offered after a commit message is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Commit,
    Edit,
    Cancel,
}

impl ReviewAction {
    const ALL: [ReviewAction; 3] = [ReviewAction::Commit, ReviewAction::Edit, ReviewAction::Cancel];

    fn label(&self) -> &'static str {
        match self {
            ReviewAction::Commit => "Commit",
            ReviewAction::Edit => "Edit",
            ReviewAction::Cancel => "Cancel",
        }
    }
}

/// User interaction used by the commit workflow and commands.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter: Send + Sync {
    /// Pick files to stage. `None` when interrupted.
    fn select_files(&self, files: &[String]) -> Result<Option<Vec<String>>, PromptError>;

    /// Show the message and ask what to do with it. Interruption is `Cancel`.
    fn review(&self, message: &GeneratedMessage) -> Result<ReviewAction, PromptError>;

    /// Edit title and description. Interrupted fields keep their previous text.
    fn edit_message(&self, message: &GeneratedMessage) -> Result<GeneratedMessage, PromptError>;

    fn confirm(&self, prompt: &str, default: bool) -> Result<Option<bool>, PromptError>;

    /// Pick one of `items`, returning its index.
    fn select(
        &self,
        prompt: &str,
        items: &[String],
        default: usize,
    ) -> Result<Option<usize>, PromptError>;

    fn input(&self, prompt: &str, initial: &str) -> Result<Option<String>, PromptError>;

    /// Hidden input. Empty answers are allowed.
    fn password(&self, prompt: &str) -> Result<Option<String>, PromptError>;
}

/// [`Prompter`] backed by dialoguer with the colorful theme.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }
}

/// Treat a Ctrl-C inside a prompt like Esc.
fn interruptible<T>(result: dialoguer::Result<Option<T>>) -> Result<Option<T>, PromptError> {
    match result {
        Ok(value) => Ok(value),
        Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(PromptError(e)),
    }
}

/// Edit the title and description as two inline fields. A field left with
/// Esc or Ctrl-C keeps its previous text.
fn edit_fields<F>(message: &GeneratedMessage, mut input: F) -> Result<GeneratedMessage, PromptError>
where
    F: FnMut(&str, &str) -> Result<Option<String>, PromptError>,
{
    let title = input("Title", &message.title)?
        .map(|text| text.trim().to_string())
        .unwrap_or_else(|| message.title.clone());
    let description = input("Description", &message.description)?
        .map(|text| text.trim().to_string())
        .unwrap_or_else(|| message.description.clone());

    Ok(GeneratedMessage { title, description })
}

impl Prompter for TerminalPrompter {
    fn select_files(&self, files: &[String]) -> Result<Option<Vec<String>>, PromptError> {
        let picked = interruptible(
            MultiSelect::with_theme(&ColorfulTheme::default())
                .with_prompt("Select files to stage (space to toggle, enter to confirm)")
                .items(files)
                .interact_opt(),
        )?;

        Ok(picked.map(|indices| {
            indices
                .into_iter()
                .filter_map(|i| files.get(i).cloned())
                .collect()
        }))
    }

    fn review(&self, message: &GeneratedMessage) -> Result<ReviewAction, PromptError> {
        println!();
        println!("{}", style::title(&message.title));
        if !message.description.is_empty() {
            println!();
            println!("{}", message.description);
        }
        println!();

        let labels: Vec<&str> = ReviewAction::ALL.iter().map(ReviewAction::label).collect();
        let choice = interruptible(
            Select::with_theme(&ColorfulTheme::default())
                .with_prompt("What would you like to do?")
                .items(&labels)
                .default(0)
                .interact_opt(),
        )?;

        Ok(choice
            .and_then(|i| ReviewAction::ALL.get(i).copied())
            .unwrap_or(ReviewAction::Cancel))
    }

    fn edit_message(&self, message: &GeneratedMessage) -> Result<GeneratedMessage, PromptError> {
        edit_fields(message, |prompt, initial| self.input(prompt, initial))
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<Option<bool>, PromptError> {
        interruptible(
            Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .default(default)
                .interact_opt(),
        )
    }

    fn select(
        &self,
        prompt: &str,
        items: &[String],
        default: usize,
    ) -> Result<Option<usize>, PromptError> {
        interruptible(
            Select::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .items(items)
                .default(default)
                .interact_opt(),
        )
    }

    fn input(&self, prompt: &str, initial: &str) -> Result<Option<String>, PromptError> {
        interruptible(
            Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .with_initial_text(initial)
                .allow_empty(true)
                .interact_text()
                .map(Some),
        )
    }

    fn password(&self, prompt: &str) -> Result<Option<String>, PromptError> {
        interruptible(
            Password::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .allow_empty_password(true)
                .interact()
                .map(Some),
        )
    }
}
