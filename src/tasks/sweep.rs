//! TTL Sweep Task
//!
//! Storage-side background task that periodically removes expired courses.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::store::CourseStore;

/// Spawns a background task that periodically purges expired courses.
///
/// The task sleeps for `interval` between sweeps and asks the store to drop
/// every document past its expiry index. It stops when `shutdown` flips to
/// true or its sender is dropped.
///
/// # Arguments
/// * `store` - Shared course store
/// * `interval` - Time between sweeps
/// * `shutdown` - Cancellation signal
///
/// # Example
/// ```ignore
/// let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
/// let sweeper = spawn_ttl_sweeper(store.clone(), Duration::from_secs(60), shutdown_rx);
/// // Later, during shutdown:
/// shutdown_tx.send(true).ok();
/// sweeper.await.ok();
/// ```
pub fn spawn_ttl_sweeper(
    store: Arc<dyn CourseStore>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "starting TTL sweeper");

        loop {
            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = shutdown.changed() => break,
            }
            if *shutdown.borrow() {
                break;
            }

            match store.purge_expired().await {
                Ok(removed) if removed > 0 => {
                    info!(removed, "TTL sweep removed expired courses");
                }
                Ok(_) => debug!("TTL sweep found no expired courses"),
                Err(e) => warn!(error = %e, "TTL sweep failed"),
            }
        }

        info!("TTL sweeper stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{
        sample_fields, CourseStore, MemoryStore, StampedCourse, CREATED_AT_FIELD,
    };
    use chrono::Utc;

    async fn store_with_index(ttl: Duration) -> MemoryStore {
        let store = MemoryStore::new();
        store
            .create_index_with_expiry(CREATED_AT_FIELD, ttl)
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_sweeper_removes_expired_courses() {
        let store = store_with_index(Duration::from_secs(600)).await;
        let stale = store
            .insert_one(StampedCourse::new(
                sample_fields("Stale"),
                Utc::now() - chrono::Duration::seconds(3600),
            ))
            .await
            .unwrap();

        let (_tx, rx) = watch::channel(false);
        let handle = spawn_ttl_sweeper(Arc::new(store.clone()), Duration::from_millis(50), rx);

        tokio::time::sleep(Duration::from_millis(300)).await;

        assert!(
            store.get(&stale.id).await.is_err(),
            "Expired course should have been swept"
        );
        handle.abort();
    }

    #[tokio::test]
    async fn test_sweeper_preserves_fresh_courses() {
        let store = store_with_index(Duration::from_secs(600)).await;
        let fresh = store
            .insert_one(StampedCourse::now(sample_fields("Fresh")))
            .await
            .unwrap();

        let (_tx, rx) = watch::channel(false);
        let handle = spawn_ttl_sweeper(Arc::new(store.clone()), Duration::from_millis(50), rx);

        tokio::time::sleep(Duration::from_millis(200)).await;

        assert!(store.get(&fresh.id).await.is_ok(), "Fresh course should remain");
        handle.abort();
    }

    #[tokio::test]
    async fn test_sweeper_expires_course_once_ttl_elapses() {
        let store = store_with_index(Duration::from_millis(200)).await;
        let course = store
            .insert_one(StampedCourse::now(sample_fields("Short lived")))
            .await
            .unwrap();

        let (_tx, rx) = watch::channel(false);
        let handle = spawn_ttl_sweeper(Arc::new(store.clone()), Duration::from_millis(50), rx);

        assert!(store.get(&course.id).await.is_ok());
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(store.get(&course.id).await.is_err());
        assert_eq!(store.stats().await.unwrap().expired, 1);

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweeper_stops_on_shutdown() {
        let store = MemoryStore::new();
        let (tx, rx) = watch::channel(false);
        let handle = spawn_ttl_sweeper(Arc::new(store), Duration::from_secs(3600), rx);

        tx.send(true).unwrap();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("sweeper should stop promptly")
            .unwrap();
    }
}
