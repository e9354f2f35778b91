//! Request and Response models for the course catalog API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{CreateCourseRequest, ListQuery, UpdateCourseRequest};
pub use responses::{
    DeleteResponse, ErrorResponse, HealthResponse, RootResponse, StatsResponse,
};
