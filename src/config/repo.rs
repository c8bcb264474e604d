//! Repository-local overrides read from `.ai-git.yaml` at the repository root.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the repository-local override.
pub const REPO_CONFIG_FILE: &str = ".ai-git.yaml";

/// Provider used by `init` when the global config names none.
const FALLBACK_PROVIDER: &str = "openai";

/// Per-repository settings layered over the global config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoConfig {
    #[serde(default)]
    pub enabled_provider: String,
    #[serde(default)]
    pub model_override: String,
    #[serde(default)]
    pub commit_style: String,
    #[serde(default)]
    pub language: String,
}

impl RepoConfig {
    /// Read the override from `root`, or `None` when the repository has none.
    pub fn load(root: &Path) -> Result<Option<Self>, ConfigError> {
        let path = root.join(REPO_CONFIG_FILE);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        if data.trim().is_empty() {
            return Ok(Some(RepoConfig::default()));
        }

        serde_yaml::from_str(&data)
            .map(Some)
            .map_err(|source| ConfigError::Parse { path, source })
    }
}

/// Create `.ai-git.yaml` in `root` seeded with `default_provider`.
///
/// Returns `false` without touching anything when the file already exists.
pub fn init_repo_config(root: &Path, default_provider: Option<&str>) -> Result<bool, ConfigError> {
    let path = root.join(REPO_CONFIG_FILE);
    if path.exists() {
        return Ok(false);
    }

    let provider = default_provider
        .filter(|p| !p.is_empty())
        .unwrap_or(FALLBACK_PROVIDER);
    let content =
        format!("enabled_provider: {provider}\ncommit_style: conventional\nlanguage: english\n");

    fs::write(&path, content).map_err(|source| ConfigError::Write { path, source })?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_override_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(RepoConfig::load(dir.path()).unwrap(), None);
    }

    #[test]
    fn test_load_override() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(REPO_CONFIG_FILE),
            "enabled_provider: ollama\nmodel_override: mistral\n",
        )
        .unwrap();

        let repo = RepoConfig::load(dir.path()).unwrap().unwrap();
        assert_eq!(repo.enabled_provider, "ollama");
        assert_eq!(repo.model_override, "mistral");
        assert!(repo.commit_style.is_empty());
    }

    #[test]
    fn test_malformed_override_is_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(REPO_CONFIG_FILE), "enabled_provider: [").unwrap();
        assert!(matches!(
            RepoConfig::load(dir.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_init_writes_seeded_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(init_repo_config(dir.path(), Some("gemini")).unwrap());

        let content = fs::read_to_string(dir.path().join(REPO_CONFIG_FILE)).unwrap();
        assert_eq!(
            content,
            "enabled_provider: gemini\ncommit_style: conventional\nlanguage: english\n"
        );

        let repo = RepoConfig::load(dir.path()).unwrap().unwrap();
        assert_eq!(repo.enabled_provider, "gemini");
        assert_eq!(repo.commit_style, "conventional");
        assert_eq!(repo.language, "english");
    }

    #[test]
    fn test_init_falls_back_to_openai() {
        let dir = tempfile::tempdir().unwrap();
        init_repo_config(dir.path(), Some("")).unwrap();
        let repo = RepoConfig::load(dir.path()).unwrap().unwrap();
        assert_eq!(repo.enabled_provider, "openai");
    }

    #[test]
    fn test_init_is_noop_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(REPO_CONFIG_FILE);
        fs::write(&path, "enabled_provider: anthropic\n").unwrap();

        assert!(!init_repo_config(dir.path(), Some("gemini")).unwrap());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "enabled_provider: anthropic\n"
        );
    }
}
