//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - TTL Sweep: Removes courses whose CreatedAt is older than the TTL
//! - Emptiness Monitor: Reloads the dataset once the store has drained
//!
//! Both tasks stop when the shared shutdown signal flips to true.

mod monitor;
mod sweep;

pub use monitor::{CycleOutcome, EmptinessMonitor};
pub use sweep::spawn_ttl_sweeper;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::error;

/// Creates the shutdown signal shared by the background tasks.
pub fn shutdown_channel() -> (watch::Sender<bool>, watch::Receiver<bool>) {
    watch::channel(false)
}

/// Waits for the named background tasks, logging any that panicked or were
/// cancelled. Returns how many failed.
pub async fn join_tasks(tasks: Vec<(&'static str, JoinHandle<()>)>) -> usize {
    let mut failed = 0;
    for (name, handle) in tasks {
        if let Err(e) = handle.await {
            error!(task = name, error = %e, "background task failed");
            failed += 1;
        }
    }
    failed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_join_tasks_counts_failures() {
        let ok = tokio::spawn(async {});
        let panicked = tokio::spawn(async { panic!("sweep blew up") });

        let failed = join_tasks(vec![("ok", ok), ("panicked", panicked)]).await;

        assert_eq!(failed, 1);
    }

    #[tokio::test]
    async fn test_join_tasks_all_clean() {
        let (tx, rx) = shutdown_channel();
        let handle = tokio::spawn(async move {
            let mut rx = rx;
            let _ = rx.changed().await;
        });
        tx.send(true).unwrap();

        assert_eq!(join_tasks(vec![("waiter", handle)]).await, 0);
    }
}
