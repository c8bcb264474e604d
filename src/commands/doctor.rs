//! `doctor`: environment and configuration diagnostics.

use std::path::Path;

use crate::config::{Config, RepoConfig};
use crate::error::ConfigError;
use crate::git::Vcs;
use crate::provider::ProviderKind;
use crate::ui::style;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    pub passed: bool,
    pub label: String,
}

impl Check {
    fn new(passed: bool, label: impl Into<String>) -> Self {
        Self {
            passed,
            label: label.into(),
        }
    }
}

/// Run every check in order. Later checks are skipped when the ones they
/// depend on fail.
pub fn run_checks<V: Vcs + ?Sized>(
    vcs: &V,
    git_on_path: bool,
    config: Result<(&Config, &Path), &ConfigError>,
) -> Vec<Check> {
    let in_repo = vcs.is_repo();
    let mut checks = vec![
        Check::new(
            git_on_path,
            if git_on_path {
                "git executable found"
            } else {
                "git executable not found on PATH"
            },
        ),
        Check::new(
            in_repo,
            if in_repo {
                "Inside a git repository"
            } else {
                "Not a git repository"
            },
        ),
    ];

    let config = match config {
        Ok((config, config_path)) => {
            checks.push(Check::new(
                true,
                format!("Configuration loaded ({})", config_path.display()),
            ));
            config
        }
        Err(e) => {
            checks.push(Check::new(false, format!("Configuration failed to load: {e}")));
            return checks;
        }
    };

    let name = config.default_provider.as_str();
    if name.is_empty() {
        checks.push(Check::new(false, "No default provider set (run 'ai-git config')"));
        return checks;
    }
    checks.push(Check::new(true, format!("Default provider: {name}")));

    let Some(entry) = config.provider(name) else {
        checks.push(Check::new(
            false,
            format!("Provider '{name}' has no configuration"),
        ));
        return checks;
    };
    checks.push(Check::new(true, format!("Provider '{name}' configured")));

    let keyless = name
        .parse::<ProviderKind>()
        .is_ok_and(|kind| !kind.requires_api_key());
    checks.push(if keyless {
        Check::new(true, format!("No API key needed for {name}"))
    } else if entry.api_key.is_empty() {
        Check::new(false, "API key missing")
    } else {
        Check::new(true, "API key present")
    });

    checks
}

/// Describe the repository override in effect, if any.
pub fn repo_override<V: Vcs + ?Sized>(vcs: &V) -> Option<String> {
    if !vcs.is_repo() {
        return None;
    }
    let root = vcs.repo_root().ok()?;
    let repo = RepoConfig::load(&root).ok()??;

    let mut parts = Vec::new();
    if !repo.enabled_provider.is_empty() {
        parts.push(format!("provider {}", repo.enabled_provider));
    }
    if !repo.model_override.is_empty() {
        parts.push(format!("model {}", repo.model_override));
    }
    if parts.is_empty() {
        return None;
    }
    Some(format!("Repository override: {}", parts.join(", ")))
}

pub fn doctor<V: Vcs + ?Sized>(vcs: &V, config: Result<(&Config, &Path), &ConfigError>) {
    println!("{}", style::title("ai-git doctor"));

    let git_on_path = which::which("git").is_ok();
    for check in run_checks(vcs, git_on_path, config) {
        println!("  {}", style::check(check.passed, &check.label));
    }

    if let Some(line) = repo_override(vcs) {
        println!("  {}", style::subtle(&line));
    }
}
