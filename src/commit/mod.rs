//! Commit message handling and the interactive commit workflow.

pub mod message;
pub mod workflow;

pub use message::GeneratedMessage;
pub use workflow::{CommitOutcome, CommitWorkflow, PushStatus, SyncOutcome, stage_interactive};
