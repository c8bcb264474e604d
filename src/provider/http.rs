//! JSON-over-HTTP plumbing shared by the provider adapters.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ProviderError;

use super::ProviderKind;

/// A provider-specific error body.
pub(crate) trait ErrorEnvelope: DeserializeOwned {
    /// The error message and optional subtype, or `None` when the envelope
    /// carried no usable message.
    fn into_message(self) -> Option<(String, Option<String>)>;
}

/// Build the HTTP client for one request. No timeout is applied.
pub(crate) fn client() -> Result<Client, ProviderError> {
    Client::builder().build().map_err(ProviderError::Client)
}

/// Send `request` and decode a success body as `T`.
///
/// Non-success statuses are decoded with the error envelope `E`; when that
/// fails or carries no message, the raw body becomes the error message.
pub(crate) async fn send_json<T, E>(
    provider: ProviderKind,
    request: RequestBuilder,
) -> Result<T, ProviderError>
where
    T: DeserializeOwned,
    E: ErrorEnvelope,
{
    let response = request
        .send()
        .await
        .map_err(|source| ProviderError::Transport { provider, source })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| ProviderError::Transport { provider, source })?;

    debug!("{} responded {} ({} bytes)", provider, status, body.len());

    if !status.is_success() {
        return Err(api_error::<E>(provider, status.as_u16(), &body));
    }

    serde_json::from_str(&body).map_err(|source| ProviderError::Decode { provider, source })
}

/// Map a non-success response body to [`ProviderError::Api`].
pub(crate) fn api_error<E: ErrorEnvelope>(
    provider: ProviderKind,
    status: u16,
    body: &str,
) -> ProviderError {
    let (message, subtype) = serde_json::from_str::<E>(body)
        .ok()
        .and_then(ErrorEnvelope::into_message)
        .unwrap_or_else(|| (body.to_string(), None));

    ProviderError::Api {
        provider,
        status,
        message,
        subtype,
    }
}

/// Join a base URL and a path without doubling the slash.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Empty strings become `None`.
pub(crate) fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// First non-empty text fragment of a response, or `EmptyResponse`.
///
/// Fragments may be absent or `null` (refusals, tool calls), so callers pass
/// them as `Option<String>`.
pub(crate) fn first_text<I>(provider: ProviderKind, fragments: I) -> Result<String, ProviderError>
where
    I: IntoIterator<Item = Option<String>>,
{
    fragments
        .into_iter()
        .flatten()
        .find(|text| !text.is_empty())
        .ok_or(ProviderError::EmptyResponse(provider))
}
