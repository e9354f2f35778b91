//! API Handlers
//!
//! HTTP request handlers for each course catalog endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::config::Config;
use crate::error::Result;
use crate::models::{
    CreateCourseRequest, DeleteResponse, HealthResponse, ListQuery, RootResponse, StatsResponse,
    UpdateCourseRequest,
};
use crate::store::{Course, CourseId, CourseStore, MemoryStore, StampedCourse};

/// Application state shared across all handlers and background tasks.
///
/// Built once at startup; handlers receive it through axum's `State`.
#[derive(Clone)]
pub struct AppState {
    /// Shared course store
    pub store: Arc<dyn CourseStore>,
    /// Record time-to-live
    pub ttl: Duration,
}

impl AppState {
    /// Creates a new AppState around the given store.
    pub fn new(store: Arc<dyn CourseStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Creates a new AppState from configuration, backed by an in-memory store.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(MemoryStore::new()), config.ttl())
    }
}

/// Handler for GET /
pub async fn root_handler(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse::new(state.ttl.as_secs()))
}

/// Handler for GET /courses
///
/// Lists courses, optionally paginated with `skip` and `limit`.
pub async fn list_courses_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Course>>> {
    let courses = state
        .store
        .list(query.skip.unwrap_or(0), query.limit)
        .await?;
    Ok(Json(courses))
}

/// Handler for POST /courses
///
/// Validates the body, stamps it with the current time and stores it.
/// An undecodable body is reported as a validation error.
pub async fn create_course_handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<CreateCourseRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Course>)> {
    let Json(req) = body?;
    let fields = req.into_fields()?;
    let course = state.store.insert_one(StampedCourse::now(fields)).await?;

    Ok((StatusCode::CREATED, Json(course)))
}

/// Handler for GET /courses/:id
pub async fn get_course_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Course>> {
    let id: CourseId = id.parse()?;
    Ok(Json(state.store.get(&id).await?))
}

/// Handler for PUT /courses/:id
///
/// Partial update: only the fields present in the body change.
pub async fn update_course_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: std::result::Result<Json<UpdateCourseRequest>, JsonRejection>,
) -> Result<Json<Course>> {
    let id: CourseId = id.parse()?;
    let Json(req) = body?;
    let patch = req.into_patch()?;
    Ok(Json(state.store.update(&id, patch).await?))
}

/// Handler for DELETE /courses/:id
pub async fn delete_course_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let id: CourseId = id.parse()?;
    state.store.delete(&id).await?;

    Ok(Json(DeleteResponse::new(id.to_string())))
}

/// Handler for GET /stats
///
/// Returns dataset lifecycle statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let stats = state.store.stats().await?;
    Ok(Json(StatsResponse::new(stats, state.ttl.as_secs())))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
