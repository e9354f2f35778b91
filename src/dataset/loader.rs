//! Dataset Loader
//!
//! Refreshes the staged dataset and swaps it into the store.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::dataset::{parse_courses, DatasetSource};
use crate::error::{CatalogError, Result};
use crate::store::{CourseStore, StampedCourse, CREATED_AT_FIELD};

/// Outcome of a successful load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadReport {
    /// Number of records now in the store
    pub loaded: usize,
    /// Timestamp every loaded record was stamped with
    pub loaded_at: DateTime<Utc>,
}

/// Loads the dataset from a [`DatasetSource`] into a [`CourseStore`].
#[derive(Clone)]
pub struct DatasetLoader {
    source: Arc<dyn DatasetSource>,
    store: Arc<dyn CourseStore>,
    ttl: Duration,
}

impl DatasetLoader {
    pub fn new(source: Arc<dyn DatasetSource>, store: Arc<dyn CourseStore>, ttl: Duration) -> Self {
        Self { source, store, ttl }
    }

    pub fn source(&self) -> &Arc<dyn DatasetSource> {
        &self.source
    }

    pub fn store(&self) -> &Arc<dyn CourseStore> {
        &self.store
    }

    /// Fetches a fresh copy, parses it and replaces the store contents.
    ///
    /// The store is only touched once the fetch and parse have succeeded, so a
    /// failed load leaves the previous dataset in place. The expiry index is
    /// (re)installed after every successful swap.
    pub async fn load(&self) -> Result<LoadReport> {
        self.source.fetch().await?;

        let staging = self.source.staging_path();
        let data = tokio::fs::read(staging).await.map_err(|e| {
            CatalogError::Load(format!("cannot read staged dataset {}: {e}", staging.display()))
        })?;
        let courses = parse_courses(&data)?;

        let loaded_at = Utc::now();
        let records: Vec<StampedCourse> = courses
            .into_iter()
            .map(|fields| StampedCourse::new(fields, loaded_at))
            .collect();

        let loaded = self.store.replace_all(records).await?;
        self.store
            .create_index_with_expiry(CREATED_AT_FIELD, self.ttl)
            .await?;

        info!(
            loaded,
            ttl_secs = self.ttl.as_secs(),
            "dataset loaded into store"
        );
        Ok(LoadReport { loaded, loaded_at })
    }
}
