//! Course Collection Module
//!
//! Document collection holding course records, with an optional expiry index
//! on the freshness timestamp.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::{CatalogError, Result};
use crate::store::{
    Course, CourseId, CoursePatch, StampedCourse, StoreStats, CREATED_AT_FIELD,
};

// == TTL Index ==
/// Expiry index: documents whose `field` is older than `expire_after` are purged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtlIndex {
    pub field: String,
    pub expire_after: Duration,
}

// == Course Collection ==
/// In-memory document collection of courses.
#[derive(Debug, Default)]
pub struct CourseCollection {
    /// Documents keyed by storage-assigned id
    documents: HashMap<CourseId, Course>,
    /// Installed expiry index, if any
    ttl_index: Option<TtlIndex>,
    /// Lifecycle statistics
    stats: StoreStats,
}

impl CourseCollection {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Count ==
    /// Returns the current number of documents.
    pub fn count(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    // == Clear ==
    /// Removes every document. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.documents.len();
        self.documents.clear();
        self.stats.set_total_courses(0);
        removed
    }

    // == Insert ==
    /// Inserts one document and assigns its identifier.
    pub fn insert_one(&mut self, record: StampedCourse) -> Course {
        let id = self.next_id();
        let course = Course::from_stamped(id, record);
        self.documents.insert(id, course.clone());
        self.stats.set_total_courses(self.documents.len());
        course
    }

    /// Inserts a batch of documents. Returns the number inserted.
    pub fn insert_many(&mut self, records: Vec<StampedCourse>) -> usize {
        let inserted = records.len();
        for record in records {
            let id = self.next_id();
            self.documents.insert(id, Course::from_stamped(id, record));
        }
        self.stats.set_total_courses(self.documents.len());
        inserted
    }

    // == Replace All ==
    /// Drops every document and inserts `records` in their place.
    ///
    /// Callers holding the collection lock see either the old or the new
    /// dataset, never a mix.
    pub fn replace_all(&mut self, records: Vec<StampedCourse>) -> usize {
        self.documents.clear();
        let inserted = self.insert_many(records);
        self.stats.record_reload(Utc::now());
        inserted
    }

    // == Expiry Index ==
    /// Installs an expiry index on `field`.
    ///
    /// Idempotent: installing the same index again is a no-op. Returns true if
    /// the index was created or its expiry changed.
    pub fn create_index_with_expiry(&mut self, field: &str, expire_after: Duration) -> Result<bool> {
        if field != CREATED_AT_FIELD {
            return Err(CatalogError::Validation(format!(
                "Expiry index is only supported on '{}', got '{}'",
                CREATED_AT_FIELD, field
            )));
        }

        let index = TtlIndex {
            field: field.to_string(),
            expire_after,
        };
        if self.ttl_index.as_ref() == Some(&index) {
            return Ok(false);
        }
        self.ttl_index = Some(index);
        Ok(true)
    }

    /// Returns the installed expiry index.
    pub fn ttl_index(&self) -> Option<&TtlIndex> {
        self.ttl_index.as_ref()
    }

    // == Purge Expired ==
    /// Removes every document that has expired at `now`.
    ///
    /// Without an expiry index nothing is removed. Returns the number removed.
    pub fn purge_expired(&mut self, now: DateTime<Utc>) -> usize {
        let Some(ttl) = self.ttl_index.as_ref().map(|index| index.expire_after) else {
            return 0;
        };

        let before = self.documents.len();
        self.documents.retain(|_, course| !course.is_expired(ttl, now));
        let removed = before - self.documents.len();

        self.stats.record_expired(removed);
        self.stats.set_total_courses(self.documents.len());
        removed
    }

    // == Find ==
    /// Lists documents ordered by creation time, skipping `skip` and returning
    /// at most `limit`.
    pub fn find(&self, skip: usize, limit: Option<usize>) -> Vec<Course> {
        let mut courses: Vec<&Course> = self.documents.values().collect();
        courses.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        courses
            .into_iter()
            .skip(skip)
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }

    /// Retrieves a document by id.
    pub fn find_by_id(&self, id: &CourseId) -> Result<Course> {
        self.documents
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    // == Update ==
    /// Applies `patch` to a document. The id and CreatedAt are never changed.
    ///
    /// The patch is rejected if the merged dates would be out of order.
    pub fn update_by_id(&mut self, id: &CourseId, patch: CoursePatch) -> Result<Course> {
        let course = self
            .documents
            .get_mut(id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;

        let mut fields = course.fields.clone();
        patch.apply(&mut fields);
        if fields.end_date < fields.start_date {
            return Err(CatalogError::Validation(
                "EndDate must not be before StartDate".to_string(),
            ));
        }

        course.fields = fields;
        Ok(course.clone())
    }

    // == Delete ==
    /// Removes a document by id, returning it.
    pub fn delete_by_id(&mut self, id: &CourseId) -> Result<Course> {
        let removed = self
            .documents
            .remove(id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        self.stats.set_total_courses(self.documents.len());
        Ok(removed)
    }

    // == Stats ==
    /// Returns current lifecycle statistics.
    pub fn stats(&self) -> StoreStats {
        let mut stats = self.stats.clone();
        stats.set_total_courses(self.documents.len());
        stats
    }

    fn next_id(&self) -> CourseId {
        loop {
            let id = CourseId::generate();
            if !self.documents.contains_key(&id) {
                return id;
            }
        }
    }
}
