//! Emptiness Monitor
//!
//! Polls the store and reloads the dataset once TTL expiry has drained it.

use std::io::ErrorKind;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::dataset::{DatasetLoader, LoadReport};

/// What one monitor cycle observed and did.
///
/// `Populated` is a cycle that stayed in the waiting state; the other
/// variants passed through a reload.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// Store still holds courses; nothing to do
    Populated { count: usize },
    /// Store was empty and the dataset was reloaded
    Reloaded(LoadReport),
    /// Store was empty but the reload failed; retried next poll
    ReloadFailed,
    /// Store count could not be read; retried next poll
    CheckFailed,
}

/// Watches the store for emptiness and triggers reloads.
#[derive(Clone)]
pub struct EmptinessMonitor {
    loader: DatasetLoader,
}

impl EmptinessMonitor {
    pub fn new(loader: DatasetLoader) -> Self {
        Self { loader }
    }

    /// Runs one check, reloading if the store is empty.
    ///
    /// Never returns an error: failures are logged and reported through the
    /// outcome so the polling loop keeps going.
    pub async fn run_cycle(&self) -> CycleOutcome {
        let count = match self.loader.store().count().await {
            Ok(count) => count,
            Err(e) => {
                warn!(error = %e, "could not count courses");
                return CycleOutcome::CheckFailed;
            }
        };
        if count > 0 {
            debug!(count, "store populated, waiting");
            return CycleOutcome::Populated { count };
        }

        info!(at = %chrono::Utc::now().to_rfc2822(), "store is empty, reloading dataset");
        self.discard_staged().await;

        match self.loader.load().await {
            Ok(report) => CycleOutcome::Reloaded(report),
            Err(e) => {
                warn!(error = %e, "dataset reload failed, retrying next poll");
                CycleOutcome::ReloadFailed
            }
        }
    }

    /// Deletes the staged copy so the reload always works from a fresh fetch.
    async fn discard_staged(&self) {
        let path = self.loader.source().staging_path();
        match tokio::fs::remove_file(path).await {
            Ok(()) => info!(path = %path.display(), "removed staged dataset"),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(path = %path.display(), "staged dataset missing, fetching anyway")
            }
            Err(e) => warn!(path = %path.display(), error = %e, "could not remove staged dataset"),
        }
    }

    /// Spawns the polling loop.
    ///
    /// Checks immediately, then every `interval`, until `shutdown` flips to
    /// true or its sender is dropped. A reload already in progress runs to
    /// completion before the loop exits.
    pub fn spawn(self, interval: Duration, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(interval_ms = interval.as_millis() as u64, "starting emptiness monitor");

            loop {
                if *shutdown.borrow() {
                    break;
                }
                self.run_cycle().await;

                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}
                    _ = shutdown.changed() => break,
                }
            }

            info!("emptiness monitor stopped");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::dataset::testing::StaticSource;
    use crate::dataset::DatasetSource;
    use crate::store::{sample_fields, CourseStore, MemoryStore, StampedCourse};

    const CSV: &str = "University,City,Country,CourseName,CourseDescription,StartDate,EndDate,Price,Currency\n\
        Harvard University,Cambridge,USA,Intro to Python,,2023-09-01,2023-12-01,199.99,USD\n\
        MIT,Cambridge,USA,Linear Algebra,,2023-09-05,2023-12-15,0,USD\n";

    fn monitor(source: &StaticSource, store: &MemoryStore) -> EmptinessMonitor {
        EmptinessMonitor::new(DatasetLoader::new(
            Arc::new(source.clone()),
            Arc::new(store.clone()),
            Duration::from_secs(600),
        ))
    }

    #[tokio::test]
    async fn test_empty_store_triggers_one_reload() {
        let dir = tempfile::tempdir().unwrap();
        let source = StaticSource::new(dir.path(), CSV);
        let store = MemoryStore::new();

        let outcome = monitor(&source, &store).run_cycle().await;

        assert!(matches!(outcome, CycleOutcome::Reloaded(report) if report.loaded == 2));
        assert_eq!(source.fetch_calls(), 1);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_populated_store_does_not_reload() {
        let dir = tempfile::tempdir().unwrap();
        let source = StaticSource::new(dir.path(), CSV);
        let store = MemoryStore::new();
        store
            .insert_one(StampedCourse::now(sample_fields("Existing")))
            .await
            .unwrap();

        let outcome = monitor(&source, &store).run_cycle().await;

        assert_eq!(outcome, CycleOutcome::Populated { count: 1 });
        assert_eq!(source.fetch_calls(), 0);
    }

    #[tokio::test]
    async fn test_reload_discards_staged_copy_first() {
        let dir = tempfile::tempdir().unwrap();
        let source = StaticSource::new(dir.path(), CSV);
        std::fs::write(source.staging_path(), "old staged data").unwrap();
        source.fail_with(502);
        let store = MemoryStore::new();

        let outcome = monitor(&source, &store).run_cycle().await;

        assert_eq!(outcome, CycleOutcome::ReloadFailed);
        assert!(!source.staging_path().exists());
    }

    #[tokio::test]
    async fn test_missing_staged_file_still_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let source = StaticSource::new(dir.path(), CSV);
        let store = MemoryStore::new();
        assert!(!source.staging_path().exists());

        let outcome = monitor(&source, &store).run_cycle().await;

        assert!(matches!(outcome, CycleOutcome::Reloaded(_)));
        assert!(source.staging_path().exists());
    }

    #[tokio::test]
    async fn test_failed_reload_is_retried_next_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let source = StaticSource::new(dir.path(), CSV);
        let store = MemoryStore::new();
        let monitor = monitor(&source, &store);

        source.fail_with(500);
        assert_eq!(monitor.run_cycle().await, CycleOutcome::ReloadFailed);

        source.set_body(CSV);
        assert!(matches!(monitor.run_cycle().await, CycleOutcome::Reloaded(_)));
        assert_eq!(source.fetch_calls(), 2);
    }

    #[tokio::test]
    async fn test_spawned_monitor_refills_drained_store() {
        let dir = tempfile::tempdir().unwrap();
        let source = StaticSource::new(dir.path(), CSV);
        let store = MemoryStore::new();

        let (tx, rx) = watch::channel(false);
        let handle = monitor(&source, &store).spawn(Duration::from_millis(50), rx);

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(store.count().await.unwrap(), 2);

        // Simulate TTL expiry draining the store.
        store.clear().await.unwrap();
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(store.count().await.unwrap(), 2);
        assert_eq!(source.fetch_calls(), 2);

        tx.send(true).unwrap();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("monitor should stop on shutdown")
            .unwrap();
    }

    #[tokio::test]
    async fn test_spawned_monitor_survives_failures() {
        let dir = tempfile::tempdir().unwrap();
        let source = StaticSource::new(dir.path(), CSV);
        source.fail_with(503);
        let store = MemoryStore::new();

        let (tx, rx) = watch::channel(false);
        let handle = monitor(&source, &store).spawn(Duration::from_millis(30), rx);

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(source.fetch_calls() >= 2);
        assert!(!handle.is_finished());

        source.set_body(CSV);
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(store.count().await.unwrap(), 2);

        drop(tx);
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("monitor should stop when the signal is dropped")
            .unwrap();
    }
}
