//! ai-git - a git workflow CLI that drafts commit messages with an LLM.
//!
//! # Overview
//!
//! ai-git wraps the everyday git commands (status, add, push, pull) and adds a
//! commit step that sends the staged diff to a text-generation provider
//! (OpenAI, Anthropic, Gemini, or a local Ollama server), lets the user review
//! or edit the proposed message, and then commits it.

pub mod commands;
pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod provider;
pub mod ui;

// Re-export commonly used types
pub use commit::{CommitOutcome, CommitWorkflow, GeneratedMessage};
pub use config::{Config, ProviderConfig, RepoConfig};
pub use error::{CommitError, ConfigError, GitError, PromptError, ProviderError};
pub use git::{GitCli, Vcs};
pub use provider::{CommitMessageProvider, ProviderKind, select};
