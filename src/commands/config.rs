//! `config`: interactive form and the legacy `set-*` subcommands.

use std::path::Path;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::provider::ProviderKind;
use crate::ui::{Prompter, style};

const TYPE_MODEL_CHOICE: &str = "Type a model name";

/// Non-interactive configuration updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegacyConfig {
    SetProvider { provider: String },
    SetKey { provider: String, key: String },
    SetModel { provider: String, model: String },
}

/// Apply a legacy update to `config`. Unknown provider names are rejected.
pub fn apply_legacy(config: &mut Config, update: &LegacyConfig) -> Result<()> {
    match update {
        LegacyConfig::SetProvider { provider } => {
            let kind: ProviderKind = provider.parse()?;
            config.default_provider = kind.as_str().to_string();
            config.provider_mut(kind.as_str());
        }
        LegacyConfig::SetKey { provider, key } => {
            let kind: ProviderKind = provider.parse()?;
            config.provider_mut(kind.as_str()).api_key = key.clone();
        }
        LegacyConfig::SetModel { provider, model } => {
            let kind: ProviderKind = provider.parse()?;
            config.provider_mut(kind.as_str()).default_model = model.clone();
        }
    }
    Ok(())
}

pub fn legacy(mut config: Config, path: &Path, update: &LegacyConfig) -> Result<()> {
    apply_legacy(&mut config, update)?;
    config.save_to(path).context("Failed to save configuration")?;
    println!("{}", style::success("Configuration updated"));
    Ok(())
}

/// Walk the user through provider, key and model. Returns `false` if the
/// form was abandoned, in which case `config` is left untouched.
pub fn fill_form<P: Prompter + ?Sized>(prompter: &P, config: &mut Config) -> Result<bool> {
    let labels: Vec<String> = ProviderKind::ALL
        .iter()
        .map(|k| k.display_name().to_string())
        .collect();
    let current = ProviderKind::ALL
        .iter()
        .position(|k| k.as_str() == config.default_provider)
        .unwrap_or(0);

    let Some(kind) = prompter
        .select("Select AI provider", &labels, current)?
        .and_then(|i| ProviderKind::ALL.get(i).copied())
    else {
        return Ok(false);
    };

    let existing = config.provider(kind.as_str()).cloned().unwrap_or_default();

    let api_key = if kind.requires_api_key() {
        let prompt = if existing.api_key.is_empty() {
            format!("{kind} API key")
        } else {
            format!("{kind} API key (leave empty to keep current)")
        };
        match prompter.password(&prompt)? {
            Some(key) if !key.is_empty() => key,
            Some(_) => existing.api_key.clone(),
            None => return Ok(false),
        }
    } else {
        existing.api_key.clone()
    };

    let Some(model) = ask_model(prompter, kind, &existing.default_model, &existing.custom_models)?
    else {
        return Ok(false);
    };

    config.default_provider = kind.as_str().to_string();
    let entry = config.provider_mut(kind.as_str());
    entry.api_key = api_key;
    entry.default_model = model;
    Ok(true)
}

fn ask_model<P: Prompter + ?Sized>(
    prompter: &P,
    kind: ProviderKind,
    current: &str,
    custom_models: &[String],
) -> Result<Option<String>> {
    let initial = if current.is_empty() {
        kind.default_model()
    } else {
        current
    };

    if !custom_models.is_empty() {
        let mut items = custom_models.to_vec();
        items.push(TYPE_MODEL_CHOICE.to_string());
        let default = custom_models.iter().position(|m| m == current).unwrap_or(0);

        match prompter.select("Select model", &items, default)? {
            None => return Ok(None),
            Some(i) if i < custom_models.len() => return Ok(Some(custom_models[i].clone())),
            Some(_) => {}
        }
    }

    Ok(prompter
        .input("Model", initial)?
        .map(|m| m.trim().to_string()))
}

pub fn interactive<P: Prompter + ?Sized>(prompter: &P, mut config: Config, path: &Path) -> Result<()> {
    if !fill_form(prompter, &mut config)? {
        println!("{}", style::subtle("Configuration unchanged."));
        return Ok(());
    }

    config.save_to(path).context("Failed to save configuration")?;
    println!(
        "{}",
        style::success(&format!("Configuration saved to {}", path.display()))
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::ui::MockPrompter;

    #[test]
    fn test_set_provider_rejects_unknown_names() {
        let mut config = Config::default();
        let err = apply_legacy(
            &mut config,
            &LegacyConfig::SetProvider {
                provider: "bard".to_string(),
            },
        )
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::UnknownProvider(name)) if name == "bard"
        ));
        assert!(config.default_provider.is_empty());
    }

    #[test]
    fn test_legacy_updates_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        for update in [
            LegacyConfig::SetProvider {
                provider: "anthropic".to_string(),
            },
            LegacyConfig::SetKey {
                provider: "anthropic".to_string(),
                key: "sk-ant".to_string(),
            },
            LegacyConfig::SetModel {
                provider: "anthropic".to_string(),
                model: "claude-3-opus".to_string(),
            },
        ] {
            legacy(Config::load_from(&path).unwrap(), &path, &update).unwrap();
        }

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.default_provider, "anthropic");
        let entry = config.provider("anthropic").unwrap();
        assert_eq!(entry.api_key, "sk-ant");
        assert_eq!(entry.default_model, "claude-3-opus");
    }

    #[test]
    fn test_form_skips_key_for_ollama() {
        let mut prompter = MockPrompter::new();
        // Ollama is last in the list.
        prompter
            .expect_select()
            .returning(|_, items, _| Ok(Some(items.len() - 1)));
        prompter.expect_password().never();
        prompter
            .expect_input()
            .withf(|_, initial| initial == "llama3")
            .returning(|_, initial| Ok(Some(initial.to_string())));

        let mut config = Config::default();
        assert!(fill_form(&prompter, &mut config).unwrap());
        assert_eq!(config.default_provider, "ollama");
        assert_eq!(config.provider("ollama").unwrap().default_model, "llama3");
    }

    #[test]
    fn test_form_empty_key_keeps_existing() {
        let mut config = Config::default();
        config.provider_mut("openai").api_key = "sk-old".to_string();

        let mut prompter = MockPrompter::new();
        prompter.expect_select().returning(|_, _, _| Ok(Some(0)));
        prompter
            .expect_password()
            .returning(|_| Ok(Some(String::new())));
        prompter
            .expect_input()
            .returning(|_, _| Ok(Some("gpt-4o".to_string())));

        assert!(fill_form(&prompter, &mut config).unwrap());
        let entry = config.provider("openai").unwrap();
        assert_eq!(entry.api_key, "sk-old");
        assert_eq!(entry.default_model, "gpt-4o");
    }

    #[test]
    fn test_form_offers_custom_models() {
        let mut config = Config::default();
        config.provider_mut("gemini").custom_models =
            vec!["gemini-1.5-pro".to_string(), "gemini-2.0-flash".to_string()];

        let mut prompter = MockPrompter::new();
        prompter
            .expect_select()
            .withf(|prompt, _, _| prompt == "Select AI provider")
            .returning(|_, _, _| Ok(Some(1)));
        prompter
            .expect_password()
            .returning(|_| Ok(Some("g-key".to_string())));
        prompter
            .expect_select()
            .withf(|prompt, items, _| prompt == "Select model" && items.len() == 3)
            .returning(|_, _, _| Ok(Some(1)));
        prompter.expect_input().never();

        assert!(fill_form(&prompter, &mut config).unwrap());
        assert_eq!(config.default_provider, "gemini");
        assert_eq!(
            config.provider("gemini").unwrap().default_model,
            "gemini-2.0-flash"
        );
    }

    #[test]
    fn test_abandoned_form_changes_nothing() {
        let mut prompter = MockPrompter::new();
        prompter.expect_select().returning(|_, _, _| Ok(Some(0)));
        prompter.expect_password().returning(|_| Ok(None));

        let mut config = Config::default();
        assert!(!fill_form(&prompter, &mut config).unwrap());
        assert_eq!(config, Config::default());
    }
}
