//! Google Gemini `generateContent` adapter.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DEFAULT_COMMIT_PROMPT_TEMPLATE;
use crate::error::ProviderError;

use super::http::{self, ErrorEnvelope};
use super::prompt::{render_prompt, truncate_diff};
use super::{CommitMessageProvider, ProviderKind, ProviderSettings};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Generates commit messages with `models/{model}:generateContent`.
///
/// The API key travels as the `key` query parameter. There is no separate
/// system role, so a configured system prompt is prepended to the template.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    settings: ProviderSettings,
}

impl GeminiProvider {
    pub fn new(settings: ProviderSettings) -> Self {
        Self { settings }
    }

    fn build_prompt(&self, diff: &str, context: &str) -> String {
        let template = if self.settings.commit_prompt.is_empty() {
            DEFAULT_COMMIT_PROMPT_TEMPLATE
        } else {
            self.settings.commit_prompt.as_str()
        };
        let template = if self.settings.system_prompt.is_empty() {
            template.to_string()
        } else {
            format!("{}\n\n{}", self.settings.system_prompt, template)
        };

        render_prompt(&template, &truncate_diff(diff), context)
    }
}

#[async_trait]
impl CommitMessageProvider for GeminiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    async fn generate(&self, diff: &str, context: &str) -> Result<String, ProviderError> {
        let base = if self.settings.base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            &self.settings.base_url
        };
        let url = http::endpoint(
            base,
            &format!("models/{}:generateContent", self.settings.model),
        );
        debug!("POST {}", url);

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: self.build_prompt(diff, context),
                }],
            }],
        };
        let request = http::client()?
            .post(url)
            .query(&[("key", self.settings.api_key.as_str())])
            .json(&body);

        let response: GenerateContentResponse =
            http::send_json::<_, ErrorResponse>(self.kind(), request).await?;

        http::first_text(
            self.kind(),
            response
                .candidates
                .into_iter()
                .flat_map(|candidate| candidate.content.parts)
                .map(|part| part.text),
        )
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Deserialize, Default)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

impl ErrorEnvelope for ErrorResponse {
    fn into_message(self) -> Option<(String, Option<String>)> {
        http::non_empty(self.error.message).map(|m| (m, self.error.status))
    }
}
