//! Global configuration stored as YAML under the user's config directory.

pub mod repo;
pub mod resolve;

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

pub use repo::{REPO_CONFIG_FILE, RepoConfig, init_repo_config};
pub use resolve::{ResolvedProvider, resolve_provider};

/// Environment variable that overrides the global config path.
pub const CONFIG_PATH_ENV_VAR: &str = "AI_GIT_CONFIG";

/// Default instruction prompt sent alongside every generation request.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an expert developer. Generate a raw git commit message. Output ONLY the message. Structure: a short title, then a blank line, then a description. No conversational filler, no quotes, no backticks.";

/// Default user prompt template. `%s` placeholders take the diff, then the context.
pub const DEFAULT_COMMIT_PROMPT_TEMPLATE: &str = "Generate a raw git commit message for the changes below. Output ONLY the message. Structure: a short title, then a blank line, then a description. No conversational filler, no quotes, no backticks.\n\nChanges:\n%s\n\n%s";

/// Persisted global configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub default_provider: String,
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderConfig>,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub system_prompt: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub commit_prompt_template: String,
}

/// Credentials and model settings for one provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub default_model: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_models: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub base_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub style: String,
}

impl Config {
    /// Fill unset prompt fields with the built-in defaults.
    fn with_default_prompts(mut self) -> Self {
        if self.system_prompt.is_empty() {
            self.system_prompt = DEFAULT_SYSTEM_PROMPT.to_string();
        }
        if self.commit_prompt_template.is_empty() {
            self.commit_prompt_template = DEFAULT_COMMIT_PROMPT_TEMPLATE.to_string();
        }
        self
    }

    /// Load the configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&default_config_path()?)
    }

    /// Load the configuration from `path`.
    ///
    /// A missing file is not an error: an empty configuration with the default
    /// prompts is returned instead.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                return Ok(Config::default().with_default_prompts());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        // An empty file deserializes to YAML null, which is not a mapping.
        if data.trim().is_empty() {
            return Ok(Config::default().with_default_prompts());
        }

        let config: Config = serde_yaml::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(config.with_default_prompts())
    }

    /// Save the configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&default_config_path()?)
    }

    /// Write the whole configuration to `path`, readable by the owner only.
    ///
    /// The file is written to a temporary sibling and renamed into place so an
    /// interrupted write never leaves a truncated config behind.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let data = serde_yaml::to_string(self).map_err(ConfigError::Serialize)?;

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let write_err = |source: std::io::Error| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        fs::create_dir_all(dir).map_err(write_err)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(data.as_bytes()).map_err(write_err)?;
        restrict_permissions(tmp.path()).map_err(write_err)?;
        tmp.persist(path).map_err(|e| write_err(e.error))?;

        debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Provider entry for `name`, if one has been stored.
    pub fn provider(&self, name: &str) -> Option<&ProviderConfig> {
        self.providers.get(name)
    }

    /// Mutable provider entry for `name`, created empty when missing.
    pub fn provider_mut(&mut self, name: &str) -> &mut ProviderConfig {
        self.providers.entry(name.to_string()).or_default()
    }
}

/// Resolve the global config path.
///
/// Uses `AI_GIT_CONFIG` when set, otherwise `~/.config/ai-git/config.yaml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    match env::var(CONFIG_PATH_ENV_VAR) {
        Ok(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => dirs::home_dir()
            .map(|home| home.join(".config").join("ai-git").join("config.yaml"))
            .ok_or(ConfigError::NoHomeDir),
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
