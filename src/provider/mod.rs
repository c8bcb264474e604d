//! Text-generation providers that draft commit messages from a diff.
//!
//! Each backend implements [`CommitMessageProvider`]; [`select`] maps a
//! configured provider name to a ready-to-use instance.

pub mod anthropic;
pub mod gemini;
pub(crate) mod http;
pub mod ollama;
pub mod openai;
pub mod prompt;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

use crate::config::ProviderConfig;
use crate::error::{ConfigError, ProviderError};

pub use anthropic::AnthropicProvider;
pub use gemini::GeminiProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;
pub use prompt::{MAX_DIFF_CHARS, TRUNCATION_MARKER, render_prompt, truncate_diff};

/// Supported text-generation backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    Gemini,
    Ollama,
}

impl ProviderKind {
    /// Every provider, in the order offered by the config form.
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::OpenAi,
        ProviderKind::Gemini,
        ProviderKind::Anthropic,
        ProviderKind::Ollama,
    ];

    /// Configuration key for this provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Gemini => "gemini",
            ProviderKind::Ollama => "ollama",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OpenAI",
            ProviderKind::Anthropic => "Anthropic",
            ProviderKind::Gemini => "Gemini",
            ProviderKind::Ollama => "Ollama",
        }
    }

    /// Local servers take no API key.
    pub fn requires_api_key(&self) -> bool {
        !matches!(self, ProviderKind::Ollama)
    }

    /// Model used when neither the repository nor the provider entry names one.
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "gpt-4o-mini",
            ProviderKind::Anthropic => "claude-3-5-sonnet-latest",
            ProviderKind::Gemini => "gemini-1.5-flash",
            ProviderKind::Ollama => "llama3",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProviderKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownProvider(s.to_string()))
    }
}

/// Draft a commit message from a diff.
#[async_trait]
pub trait CommitMessageProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Generate a raw commit message (title line, blank line, description).
    async fn generate(&self, diff: &str, context: &str) -> Result<String, ProviderError>;
}

/// Everything a provider needs for one generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderSettings {
    pub api_key: String,
    /// Overrides the provider's public endpoint when non-empty.
    pub base_url: String,
    pub model: String,
    pub system_prompt: String,
    pub commit_prompt: String,
}

/// Build the provider registered under `name`.
///
/// Returns `None` for unrecognized names, including the empty string. An empty
/// `model` falls back to [`ProviderKind::default_model`].
pub fn select(
    name: &str,
    config: &ProviderConfig,
    model: &str,
    system_prompt: &str,
    commit_prompt_template: &str,
) -> Option<Box<dyn CommitMessageProvider>> {
    let kind = ProviderKind::from_str(name).ok()?;

    let model = if model.is_empty() {
        kind.default_model()
    } else {
        model
    };
    let settings = ProviderSettings {
        api_key: config.api_key.clone(),
        base_url: config.base_url.clone(),
        model: model.to_string(),
        system_prompt: system_prompt.to_string(),
        commit_prompt: commit_prompt_template.to_string(),
    };

    let provider: Box<dyn CommitMessageProvider> = match kind {
        ProviderKind::OpenAi => Box::new(OpenAiProvider::new(settings)),
        ProviderKind::Anthropic => Box::new(AnthropicProvider::new(settings)),
        ProviderKind::Gemini => Box::new(GeminiProvider::new(settings)),
        ProviderKind::Ollama => Box::new(OllamaProvider::new(settings)),
    };
    Some(provider)
}
