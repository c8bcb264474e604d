//! Command handlers behind the `ai-git` subcommands.

pub mod commit;
pub mod config;
pub mod doctor;
pub mod repo;

pub use commit::{commit, sync};
pub use config::LegacyConfig;
pub use doctor::doctor;
pub use repo::{DEFAULT_LOG_LIMIT, add, branch, init, log, pull, push, status};
