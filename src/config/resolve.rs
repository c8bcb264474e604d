//! Effective provider/model resolution across global and repository config.

use crate::error::ConfigError;

use super::{Config, ProviderConfig, RepoConfig};

/// Provider settings after repository overrides are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProvider {
    pub name: String,
    pub config: ProviderConfig,
    pub model: String,
}

/// Pick the provider and model for a generation.
///
/// Non-empty repository values win over the global default provider and the
/// provider's default model.
pub fn resolve_provider(
    config: &Config,
    repo: Option<&RepoConfig>,
) -> Result<ResolvedProvider, ConfigError> {
    let name = repo
        .map(|r| r.enabled_provider.as_str())
        .filter(|p| !p.is_empty())
        .unwrap_or(config.default_provider.as_str());

    if name.is_empty() {
        return Err(ConfigError::NoProviderSelected);
    }

    let provider_config = config
        .provider(name)
        .cloned()
        .ok_or_else(|| ConfigError::ProviderNotConfigured(name.to_string()))?;

    let model = repo
        .map(|r| r.model_override.as_str())
        .filter(|m| !m.is_empty())
        .unwrap_or(provider_config.default_model.as_str())
        .to_string();

    Ok(ResolvedProvider {
        name: name.to_string(),
        config: provider_config,
        model,
    })
}
