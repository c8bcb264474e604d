//! Anthropic messages adapter.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DEFAULT_SYSTEM_PROMPT;
use crate::error::ProviderError;

use super::http::{self, ErrorEnvelope};
use super::prompt::{CHAT_PROMPT_TEMPLATE, render_prompt, truncate_diff};
use super::{CommitMessageProvider, ProviderKind, ProviderSettings};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

/// Generates commit messages with the `/messages` endpoint.
#[derive(Debug, Clone)]
pub struct AnthropicProvider {
    settings: ProviderSettings,
}

impl AnthropicProvider {
    pub fn new(settings: ProviderSettings) -> Self {
        Self { settings }
    }

    fn build_request(&self, diff: &str, context: &str) -> MessagesRequest<'_> {
        let system = if self.settings.system_prompt.is_empty() {
            DEFAULT_SYSTEM_PROMPT
        } else {
            self.settings.system_prompt.as_str()
        };
        let template = if self.settings.commit_prompt.is_empty() {
            CHAT_PROMPT_TEMPLATE
        } else {
            self.settings.commit_prompt.as_str()
        };

        MessagesRequest {
            model: &self.settings.model,
            system,
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: render_prompt(template, &truncate_diff(diff), context),
            }],
        }
    }
}

#[async_trait]
impl CommitMessageProvider for AnthropicProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    async fn generate(&self, diff: &str, context: &str) -> Result<String, ProviderError> {
        let base = if self.settings.base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            &self.settings.base_url
        };
        let url = http::endpoint(base, "messages");
        debug!("POST {} (model {})", url, self.settings.model);

        let request = http::client()?
            .post(url)
            .header("x-api-key", &self.settings.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&self.build_request(diff, context));

        let response: MessagesResponse =
            http::send_json::<_, ErrorResponse>(self.kind(), request).await?;

        http::first_text(
            self.kind(),
            response.content.into_iter().map(|block| block.text),
        )
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    system: &'a str,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
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
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

impl ErrorEnvelope for ErrorResponse {
    fn into_message(self) -> Option<(String, Option<String>)> {
        http::non_empty(self.error.message).map(|m| (m, self.error.kind))
    }
}
