//! Local Ollama `/api/generate` adapter.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{DEFAULT_COMMIT_PROMPT_TEMPLATE, DEFAULT_SYSTEM_PROMPT};
use crate::error::ProviderError;

use super::http::{self, ErrorEnvelope};
use super::prompt::{render_prompt, truncate_diff};
use super::{CommitMessageProvider, ProviderKind, ProviderSettings};

const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Generates commit messages with a local Ollama server. No authentication.
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    settings: ProviderSettings,
}

impl OllamaProvider {
    pub fn new(settings: ProviderSettings) -> Self {
        Self { settings }
    }

    fn build_request(&self, diff: &str, context: &str) -> GenerateRequest<'_> {
        let system = if self.settings.system_prompt.is_empty() {
            DEFAULT_SYSTEM_PROMPT
        } else {
            self.settings.system_prompt.as_str()
        };
        let template = if self.settings.commit_prompt.is_empty() {
            DEFAULT_COMMIT_PROMPT_TEMPLATE
        } else {
            self.settings.commit_prompt.as_str()
        };

        GenerateRequest {
            model: &self.settings.model,
            prompt: render_prompt(template, &truncate_diff(diff), context),
            system,
            stream: false,
        }
    }
}

#[async_trait]
impl CommitMessageProvider for OllamaProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Ollama
    }

    async fn generate(&self, diff: &str, context: &str) -> Result<String, ProviderError> {
        let base = if self.settings.base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            &self.settings.base_url
        };
        let url = http::endpoint(base, "api/generate");
        debug!("POST {} (model {})", url, self.settings.model);

        let request = http::client()?
            .post(url)
            .json(&self.build_request(diff, context));

        let response: GenerateResponse =
            http::send_json::<_, GenerateResponse>(self.kind(), request).await?;

        // Ollama can report failures in a 200 body.
        if !response.error.is_empty() {
            return Err(ProviderError::Api {
                provider: self.kind(),
                status: 200,
                message: response.error,
                subtype: None,
            });
        }
        if response.response.is_empty() {
            return Err(ProviderError::EmptyResponse(self.kind()));
        }

        Ok(response.response)
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    #[serde(skip_serializing_if = "str::is_empty")]
    system: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
    #[serde(default)]
    error: String,
}

impl ErrorEnvelope for GenerateResponse {
    fn into_message(self) -> Option<(String, Option<String>)> {
        http::non_empty(self.error).map(|m| (m, None))
    }
}
