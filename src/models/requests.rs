//! Request DTOs for the course catalog API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{CatalogError, Result};
use crate::store::{CourseFields, CoursePatch};

/// Request body for creating a course (POST /courses)
///
/// Field names follow the dataset columns. Required fields are defaulted at
/// deserialization so that a missing field is reported as a validation error
/// rather than a body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateCourseRequest {
    #[serde(default)]
    pub university: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub course_name: String,
    #[serde(default)]
    pub course_description: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub currency: String,
}

impl CreateCourseRequest {
    /// Validates the request and converts it into course fields.
    pub fn into_fields(self) -> Result<CourseFields> {
        for (name, value) in [
            ("University", &self.university),
            ("City", &self.city),
            ("Country", &self.country),
            ("CourseName", &self.course_name),
            ("Currency", &self.currency),
        ] {
            if value.trim().is_empty() {
                return Err(invalid(format!("{} is required", name)));
            }
        }

        let start_date = self
            .start_date
            .ok_or_else(|| invalid("StartDate is required"))?;
        let end_date = self.end_date.ok_or_else(|| invalid("EndDate is required"))?;
        let price = self.price.ok_or_else(|| invalid("Price is required"))?;

        check_price(price)?;
        if end_date < start_date {
            return Err(invalid("EndDate must not be before StartDate"));
        }

        Ok(CourseFields {
            university: self.university,
            city: self.city,
            country: self.country,
            course_name: self.course_name,
            course_description: self.course_description.filter(|d| !d.is_empty()),
            start_date,
            end_date,
            price,
            currency: self.currency,
        })
    }
}

/// Request body for updating a course (PUT /courses/:id)
///
/// Every field is optional; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateCourseRequest {
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

impl UpdateCourseRequest {
    /// Validates the request and converts it into a patch.
    pub fn into_patch(self) -> Result<CoursePatch> {
        for (name, value) in [
            ("University", &self.university),
            ("City", &self.city),
            ("Country", &self.country),
            ("CourseName", &self.course_name),
            ("Currency", &self.currency),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(invalid(format!("{} cannot be empty", name)));
            }
        }
        if let Some(price) = self.price {
            check_price(price)?;
        }

        let patch = CoursePatch {
            university: self.university,
            city: self.city,
            country: self.country,
            course_name: self.course_name,
            course_description: self.course_description,
            start_date: self.start_date,
            end_date: self.end_date,
            price: self.price,
            currency: self.currency,
        };
        if patch.is_empty() {
            return Err(invalid("No fields to update"));
        }
        Ok(patch)
    }
}

/// Query string for listing courses (GET /courses)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// Number of courses to skip
    #[serde(default)]
    pub skip: Option<usize>,
    /// Maximum number of courses to return
    #[serde(default)]
    pub limit: Option<usize>,
}

fn check_price(price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(invalid("Price must be a non-negative number"));
    }
    Ok(())
}

fn invalid(msg: impl Into<String>) -> CatalogError {
    CatalogError::Validation(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "CourseName": "Introduction to Python",
        "University": "Harvard University",
        "City": "Cambridge",
        "Country": "USA",
        "CourseDescription": "A beginner's course in Python.",
        "StartDate": "2023-09-01",
        "EndDate": "2023-12-01",
        "Price": 199.99,
        "Currency": "USD"
    }"#;

    #[test]
    fn test_create_request_deserialize() {
        let req: CreateCourseRequest = serde_json::from_str(VALID).unwrap();
        let fields = req.into_fields().unwrap();
        assert_eq!(fields.course_name, "Introduction to Python");
        assert_eq!(fields.price, 199.99);
        assert_eq!(fields.start_date, NaiveDate::from_ymd_opt(2023, 9, 1).unwrap());
    }

    #[test]
    fn test_create_request_missing_field() {
        let req: CreateCourseRequest =
            serde_json::from_str(r#"{"CourseName": "x", "University": "y"}"#).unwrap();
        let err = req.into_fields().unwrap_err();
        assert!(matches!(err, CatalogError::Validation(ref msg) if msg.contains("City")));
    }

    #[test]
    fn test_create_request_negative_price() {
        let mut req: CreateCourseRequest = serde_json::from_str(VALID).unwrap();
        req.price = Some(-1.0);
        assert!(matches!(req.into_fields(), Err(CatalogError::Validation(_))));
    }

    #[test]
    fn test_create_request_dates_out_of_order() {
        let mut req: CreateCourseRequest = serde_json::from_str(VALID).unwrap();
        req.end_date = NaiveDate::from_ymd_opt(2023, 1, 1);
        assert!(matches!(req.into_fields(), Err(CatalogError::Validation(_))));
    }

    #[test]
    fn test_update_request_price_only() {
        let req: UpdateCourseRequest = serde_json::from_str(r#"{"Price": 10}"#).unwrap();
        let patch = req.into_patch().unwrap();
        assert_eq!(patch.price, Some(10.0));
        assert!(patch.course_name.is_none());
    }

    #[test]
    fn test_update_request_empty_rejected() {
        let req: UpdateCourseRequest = serde_json::from_str("{}").unwrap();
        assert!(matches!(req.into_patch(), Err(CatalogError::Validation(_))));
    }

    #[test]
    fn test_update_request_blank_string_rejected() {
        let req: UpdateCourseRequest = serde_json::from_str(r#"{"City": "  "}"#).unwrap();
        assert!(matches!(req.into_patch(), Err(CatalogError::Validation(_))));
    }
}
