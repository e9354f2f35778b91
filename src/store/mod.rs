//! Store Module
//!
//! Document storage for course records with a storage-enforced TTL policy.

mod collection;
mod memory;
mod record;
mod stats;


use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

// Re-export public types
pub use collection::{CourseCollection, TtlIndex};
pub use memory::MemoryStore;
pub use record::{Course, CourseFields, CourseId, CoursePatch, StampedCourse};
pub use stats::StoreStats;

#[cfg(test)]
pub(crate) use record::sample_fields;

// == Public Constants ==
/// Name of the freshness timestamp field the expiry index is built on
pub const CREATED_AT_FIELD: &str = "CreatedAt";

// == Course Store ==
/// Storage backend for course documents.
///
/// The refresh lifecycle only needs `count`, `replace_all`, `purge_expired`
/// and `create_index_with_expiry`; the remaining methods serve the CRUD
/// handlers.
#[async_trait]
pub trait CourseStore: Send + Sync + 'static {
    /// Number of documents currently stored.
    async fn count(&self) -> Result<usize>;

    /// Removes every document, returning how many were removed.
    async fn clear(&self) -> Result<usize>;

    /// Inserts a batch of documents. All-or-nothing.
    async fn insert_many(&self, records: Vec<StampedCourse>) -> Result<usize>;

    /// Replaces the whole dataset with `records`.
    ///
    /// The default clears then inserts, which lets readers observe an empty
    /// store in between. Backends that can swap atomically should override it.
    async fn replace_all(&self, records: Vec<StampedCourse>) -> Result<usize> {
        self.clear().await?;
        self.insert_many(records).await
    }

    /// Installs an expiry index on `field`. Idempotent.
    async fn create_index_with_expiry(&self, field: &str, expire_after: Duration) -> Result<()>;

    /// Runs one pass of the storage TTL sweep, returning how many expired.
    async fn purge_expired(&self) -> Result<usize>;

    async fn list(&self, skip: usize, limit: Option<usize>) -> Result<Vec<Course>>;

    async fn get(&self, id: &CourseId) -> Result<Course>;

    async fn insert_one(&self, record: StampedCourse) -> Result<Course>;

    async fn update(&self, id: &CourseId, patch: CoursePatch) -> Result<Course>;

    async fn delete(&self, id: &CourseId) -> Result<Course>;

    async fn stats(&self) -> Result<StoreStats>;
}
