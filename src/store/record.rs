//! Course Record Module
//!
//! Defines the stored course document and its freshness timestamp.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CatalogError;

// == Course Id ==
/// Storage-assigned identifier of a course document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(Uuid);

impl CourseId {
    /// Generates a fresh identifier. Only the store calls this.
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl FromStr for CourseId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Only the hyphenated form is accepted.
        if s.len() != 36 {
            return Err(CatalogError::Validation(format!(
                "Invalid course id format: '{}'",
                s
            )));
        }
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| CatalogError::Validation(format!("Invalid course id format: '{}'", s)))
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

// == Course Fields ==
/// The user-visible fields of a course, without storage metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CourseFields {
    pub university: String,
    pub city: String,
    pub country: String,
    pub course_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: f64,
    pub currency: String,
}

// == Stamped Course ==
/// A course ready for insertion: fields plus the freshness timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct StampedCourse {
    pub fields: CourseFields,
    pub created_at: DateTime<Utc>,
}

impl StampedCourse {
    pub fn new(fields: CourseFields, created_at: DateTime<Utc>) -> Self {
        Self { fields, created_at }
    }

    /// Stamps the fields with the current time.
    pub fn now(fields: CourseFields) -> Self {
        Self::new(fields, Utc::now())
    }
}

// == Course ==
/// A stored course document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: CourseId,
    #[serde(flatten)]
    pub fields: CourseFields,
    #[serde(rename = "CreatedAt")]
    pub created_at: DateTime<Utc>,
}

impl Course {
    pub(crate) fn from_stamped(id: CourseId, stamped: StampedCourse) -> Self {
        Self {
            id,
            fields: stamped.fields,
            created_at: stamped.created_at,
        }
    }

    // == Is Expired ==
    /// Checks whether the document has outlived `ttl` at instant `now`.
    ///
    /// A document is expired once `now >= created_at + ttl`.
    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        match chrono::Duration::from_std(ttl) {
            Ok(ttl) => now - self.created_at >= ttl,
            // A TTL too large for chrono never elapses.
            Err(_) => false,
        }
    }

    /// Instant the document becomes eligible for removal under `ttl`.
    pub fn expires_at(&self, ttl: Duration) -> Option<DateTime<Utc>> {
        chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| self.created_at.checked_add_signed(ttl))
    }
}

// == Course Patch ==
/// Partial update of a course. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoursePatch {
    pub university: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub course_name: Option<String>,
    pub course_description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub price: Option<f64>,
    pub currency: Option<String>,
}

impl CoursePatch {
    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Applies the patch to `fields` in place.
    pub fn apply(self, fields: &mut CourseFields) {
        if let Some(v) = self.university {
            fields.university = v;
        }
        if let Some(v) = self.city {
            fields.city = v;
        }
        if let Some(v) = self.country {
            fields.country = v;
        }
        if let Some(v) = self.course_name {
            fields.course_name = v;
        }
        // An empty description clears it, matching how creation stores it
        if let Some(v) = self.course_description {
            fields.course_description = Some(v).filter(|d| !d.is_empty());
        }
        if let Some(v) = self.start_date {
            fields.start_date = v;
        }
        if let Some(v) = self.end_date {
            fields.end_date = v;
        }
        if let Some(v) = self.price {
            fields.price = v;
        }
        if let Some(v) = self.currency {
            fields.currency = v;
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_fields(name: &str) -> CourseFields {
    CourseFields {
        university: "Harvard University".to_string(),
        city: "Cambridge".to_string(),
        country: "USA".to_string(),
        course_name: name.to_string(),
        course_description: Some("A beginner's course.".to_string()),
        start_date: NaiveDate::from_ymd_opt(2023, 9, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2023, 12, 1).unwrap(),
        price: 199.99,
        currency: "USD".to_string(),
    }
}
