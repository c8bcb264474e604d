//! Error types for ai-git modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

use crate::provider::ProviderKind;

/// Errors from invoking the external git binary.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to run git {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {command} failed ({}): {stderr}",
             .code.map_or("terminated by signal".to_string(), |c| format!("exit code {c}")))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Not a git repository")]
    NotARepository,
}

/// Errors from loading, saving, or resolving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine the home directory")]
    NoHomeDir,

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[source] serde_yaml::Error),

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No AI provider configured. Run 'ai-git config' to pick one.")]
    NoProviderSelected,

    #[error("Provider '{0}' is not configured. Run 'ai-git config' to set it up.")]
    ProviderNotConfigured(String),

    #[error("Unknown provider '{0}' (expected one of: openai, anthropic, gemini, ollama)")]
    UnknownProvider(String),
}

/// Errors from a text-generation provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("{provider} request failed: {source}")]
    Transport {
        provider: ProviderKind,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} API error: {message}{}",
             .subtype.as_deref().map(|s| format!(" ({s})")).unwrap_or_default())]
    Api {
        provider: ProviderKind,
        status: u16,
        message: String,
        subtype: Option<String>,
    },

    #[error("{provider} returned an unreadable response: {source}")]
    Decode {
        provider: ProviderKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("no response from {0}")]
    EmptyResponse(ProviderKind),
}

impl ProviderError {
    /// The provider the error came from, when known.
    pub fn provider(&self) -> Option<ProviderKind> {
        match self {
            ProviderError::Client(_) => None,
            ProviderError::Transport { provider, .. }
            | ProviderError::Api { provider, .. }
            | ProviderError::Decode { provider, .. } => Some(*provider),
            ProviderError::EmptyResponse(provider) => Some(*provider),
        }
    }
}

/// Errors from interactive prompts.
#[derive(Error, Debug)]
#[error("Prompt failed: {0}")]
pub struct PromptError(#[from] pub dialoguer::Error);

/// Errors from the commit workflow.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("No changes to commit (working tree is clean)")]
    NoChanges,

    #[error("Failed to initialize provider '{0}'")]
    UnknownProvider(String),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
