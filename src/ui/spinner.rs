//! Spinner around a single long-running operation.
//!
//! Ctrl-C stops the wait and returns `None`. The underlying work is abandoned
//! rather than cancelled.

use std::future::Future;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::task::JoinError;
use tracing::debug;

const TICK_INTERVAL: Duration = Duration::from_millis(100);

fn spinner(message: &str) -> ProgressBar {
    let style = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"])
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());

    let pb = ProgressBar::new_spinner();
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(TICK_INTERVAL);
    pb
}

/// Await `task` while a spinner ticks. Returns `None` on Ctrl-C.
pub async fn with_spinner<F>(message: &str, task: F) -> Option<F::Output>
where
    F: Future,
{
    let pb = spinner(message);

    let output = tokio::select! {
        output = task => Some(output),
        _ = tokio::signal::ctrl_c() => {
            debug!("Interrupted while waiting on: {}", message);
            None
        }
    };

    pb.finish_and_clear();
    output
}

/// Run a blocking closure on the blocking pool while a spinner ticks.
///
/// Returns `Ok(None)` on Ctrl-C and `Err` only if the closure panicked.
pub async fn run_blocking<F, T>(message: &str, work: F) -> Result<Option<T>, JoinError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    with_spinner(message, tokio::task::spawn_blocking(work))
        .await
        .transpose()
}
