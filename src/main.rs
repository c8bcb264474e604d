//! ai-git - CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ai_git::commands::{self, DEFAULT_LOG_LIMIT, LegacyConfig};
use ai_git::config::default_config_path;
use ai_git::error::ConfigError;
use ai_git::ui::{TerminalPrompter, style};
use ai_git::{Config, GitCli};

/// Environment variable holding the log filter (e.g. `debug`, `ai_git=trace`).
const LOG_ENV_VAR: &str = "AI_GIT_LOG";

/// Git workflow helper that writes commit messages with an LLM.
#[derive(Parser, Debug)]
#[command(name = "ai-git")]
#[command(about = "Git workflow helper that writes commit messages with an LLM")]
#[command(version, arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the working tree status
    Status,

    /// Stage a path, or pick files interactively
    Add {
        /// Path to stage (omit to choose from changed files)
        path: Option<String>,
    },

    /// Generate a commit message for the staged changes and commit
    Commit,

    /// Push the current branch
    Push,

    /// Pull from the upstream branch
    Pull,

    /// Commit, then push
    Sync,

    /// Create a .ai-git.yaml override in the repository root
    Init,

    /// Configure providers (interactive when no action is given)
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },

    /// Check the environment and configuration
    Doctor,

    /// Print the version
    Version,

    /// Show recent commits
    Log {
        /// Number of commits to show
        #[arg(default_value_t = DEFAULT_LOG_LIMIT)]
        limit: usize,
    },

    /// Switch branches (interactive when no name is given)
    Branch {
        /// Branch to check out
        name: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Set the default provider
    SetProvider { provider: String },

    /// Store the API key for a provider
    SetKey { provider: String, key: String },

    /// Set the default model for a provider
    SetModel { provider: String, model: String },
}

impl From<ConfigAction> for LegacyConfig {
    fn from(action: ConfigAction) -> Self {
        match action {
            ConfigAction::SetProvider { provider } => LegacyConfig::SetProvider { provider },
            ConfigAction::SetKey { provider, key } => LegacyConfig::SetKey { provider, key },
            ConfigAction::SetModel { provider, model } => LegacyConfig::SetModel { provider, model },
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", style::error(&format!("{e:#}")));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn load_config() -> Result<(Config, PathBuf), ConfigError> {
    let path = default_config_path()?;
    let config = Config::load_from(&path)?;
    Ok((config, path))
}

async fn run(cli: Cli) -> Result<()> {
    let git = Arc::new(GitCli::new());
    let prompter = TerminalPrompter::new();

    match cli.command {
        Command::Status => commands::status(git.as_ref()),
        Command::Add { path } => commands::add(git.as_ref(), &prompter, path.as_deref()),
        Command::Commit => {
            let (config, _) = load_config().context("Failed to load configuration")?;
            commands::commit(git, &prompter, &config).await
        }
        Command::Push => commands::push(git).await,
        Command::Pull => commands::pull(git).await,
        Command::Sync => {
            let (config, _) = load_config().context("Failed to load configuration")?;
            commands::sync(git, &prompter, &config).await
        }
        Command::Init => {
            let loaded = load_config().ok();
            let provider = loaded.as_ref().map(|(c, _)| c.default_provider.as_str());
            commands::init(git.as_ref(), provider)
        }
        Command::Config { action } => {
            let (config, path) = load_config().context("Failed to load configuration")?;
            match action {
                Some(action) => commands::config::legacy(config, &path, &action.into()),
                None => commands::config::interactive(&prompter, config, &path),
            }
        }
        Command::Doctor => {
            let loaded = load_config();
            commands::doctor(
                git.as_ref(),
                loaded.as_ref().map(|(c, p)| (c, p.as_path())),
            );
            Ok(())
        }
        Command::Version => {
            println!("ai-git version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Command::Log { limit } => commands::log(git.as_ref(), limit),
        Command::Branch { name } => commands::branch(git.as_ref(), &prompter, name.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_legacy_config_parses() {
        let cli = Cli::try_parse_from(["ai-git", "config", "set-key", "openai", "sk-123"]).unwrap();
        match cli.command {
            Command::Config {
                action: Some(action),
            } => assert_eq!(
                LegacyConfig::from(action),
                LegacyConfig::SetKey {
                    provider: "openai".to_string(),
                    key: "sk-123".to_string()
                }
            ),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_log_limit_defaults() {
        let cli = Cli::try_parse_from(["ai-git", "log"]).unwrap();
        assert!(matches!(cli.command, Command::Log { limit: 10 }));
    }

    #[test]
    fn test_no_command_is_usage_error() {
        assert!(Cli::try_parse_from(["ai-git"]).is_err());
    }
}
