//! In-memory course store shared between the HTTP handlers and the
//! background tasks.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::store::{
    Course, CourseCollection, CourseId, CoursePatch, CourseStore, StampedCourse, StoreStats,
};

/// Course store backed by a [`CourseCollection`] behind a tokio `RwLock`.
///
/// Cloning is cheap and every clone refers to the same collection.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collection: Arc<RwLock<CourseCollection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CourseStore for MemoryStore {
    async fn count(&self) -> Result<usize> {
        Ok(self.collection.read().await.count())
    }

    async fn clear(&self) -> Result<usize> {
        Ok(self.collection.write().await.clear())
    }

    async fn insert_many(&self, records: Vec<StampedCourse>) -> Result<usize> {
        Ok(self.collection.write().await.insert_many(records))
    }

    async fn replace_all(&self, records: Vec<StampedCourse>) -> Result<usize> {
        // Single write lock: readers never see the store half-loaded.
        Ok(self.collection.write().await.replace_all(records))
    }

    async fn create_index_with_expiry(&self, field: &str, expire_after: Duration) -> Result<()> {
        self.collection
            .write()
            .await
            .create_index_with_expiry(field, expire_after)
            .map(|_| ())
    }

    async fn purge_expired(&self) -> Result<usize> {
        Ok(self.collection.write().await.purge_expired(Utc::now()))
    }

    async fn list(&self, skip: usize, limit: Option<usize>) -> Result<Vec<Course>> {
        Ok(self.collection.read().await.find(skip, limit))
    }

    async fn get(&self, id: &CourseId) -> Result<Course> {
        self.collection.read().await.find_by_id(id)
    }

    async fn insert_one(&self, record: StampedCourse) -> Result<Course> {
        Ok(self.collection.write().await.insert_one(record))
    }

    async fn update(&self, id: &CourseId, patch: CoursePatch) -> Result<Course> {
        self.collection.write().await.update_by_id(id, patch)
    }

    async fn delete(&self, id: &CourseId) -> Result<Course> {
        self.collection.write().await.delete_by_id(id)
    }

    async fn stats(&self) -> Result<StoreStats> {
        Ok(self.collection.read().await.stats())
    }
}
