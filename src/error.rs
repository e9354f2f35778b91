//! Error types for the course catalog
//!
//! Provides unified error handling using thiserror.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Catalog Error Enum ==
/// Unified error type for the course catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Dataset endpoint answered with a non-success status
    #[error("Dataset download failed with status {status}")]
    FetchStatus { status: u16 },

    /// Dataset download failed before a response was received
    #[error("Dataset download failed: {0}")]
    Fetch(String),

    /// Staged dataset could not be read, parsed or stored
    #[error("Dataset load failed: {0}")]
    Load(String),

    /// Course not found in the store
    #[error("Course not found: {0}")]
    NotFound(String),

    /// Malformed identifier or invalid request data
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogError::FetchStatus { .. } | CatalogError::Fetch(_) => "fetch_error",
            CatalogError::Load(_) => "load_error",
            CatalogError::NotFound(_) => "not_found",
            CatalogError::Validation(_) => "validation_error",
            CatalogError::Internal(_) => "internal_error",
        }
    }

    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::FetchStatus { .. } | CatalogError::Fetch(_) => StatusCode::BAD_GATEWAY,
            CatalogError::Load(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
            CatalogError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::Fetch(err.to_string())
    }
}

impl From<csv::Error> for CatalogError {
    fn from(err: csv::Error) -> Self {
        CatalogError::Load(err.to_string())
    }
}

// Undecodable request bodies share the validation error shape.
impl From<JsonRejection> for CatalogError {
    fn from(rejection: JsonRejection) -> Self {
        CatalogError::Validation(rejection.body_text())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::new(self.kind(), self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the course catalog.
pub type Result<T> = std::result::Result<T, CatalogError>;
