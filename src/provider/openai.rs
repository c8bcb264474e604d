//! OpenAI chat-completions adapter.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DEFAULT_SYSTEM_PROMPT;
use crate::error::ProviderError;

use super::http::{self, ErrorEnvelope};
use super::prompt::{CHAT_PROMPT_TEMPLATE, render_prompt, truncate_diff};
use super::{CommitMessageProvider, ProviderKind, ProviderSettings};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Generates commit messages with the `/chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    settings: ProviderSettings,
}

impl OpenAiProvider {
    pub fn new(settings: ProviderSettings) -> Self {
        Self { settings }
    }

    fn build_request(&self, diff: &str, context: &str) -> ChatCompletionRequest<'_> {
        let system = if self.settings.system_prompt.is_empty() {
            DEFAULT_SYSTEM_PROMPT.to_string()
        } else {
            self.settings.system_prompt.clone()
        };
        let template = if self.settings.commit_prompt.is_empty() {
            CHAT_PROMPT_TEMPLATE
        } else {
            self.settings.commit_prompt.as_str()
        };

        ChatCompletionRequest {
            model: &self.settings.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: render_prompt(template, &truncate_diff(diff), context),
                },
            ],
        }
    }
}

#[async_trait]
impl CommitMessageProvider for OpenAiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    async fn generate(&self, diff: &str, context: &str) -> Result<String, ProviderError> {
        let base = if self.settings.base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            &self.settings.base_url
        };
        let url = http::endpoint(base, "chat/completions");
        debug!("POST {} (model {})", url, self.settings.model);

        let request = http::client()?
            .post(url)
            .bearer_auth(&self.settings.api_key)
            .json(&self.build_request(diff, context));

        let response: ChatCompletionResponse =
            http::send_json::<_, ErrorResponse>(self.kind(), request).await?;

        http::first_text(
            self.kind(),
            response.choices.into_iter().map(|choice| choice.message.content),
        )
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
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
