//! API Routes
//!
//! Configures the Axum router with all course catalog endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_course_handler, delete_course_handler, get_course_handler, health_handler,
    list_courses_handler, root_handler, stats_handler, update_course_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /` - Service description
/// - `GET /courses` - List courses (`?skip=&limit=`)
/// - `POST /courses` - Create a course
/// - `GET /courses/:id` - Retrieve a course
/// - `PUT /courses/:id` - Update a course
/// - `DELETE /courses/:id` - Delete a course
/// - `GET /stats` - Dataset lifecycle statistics
/// - `GET /health` - Health check endpoint
///
/// The paths `/get_all_courses/`, `/create_course` and `/delete_course/:id`
/// are kept as aliases for existing clients.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route(
            "/courses",
            get(list_courses_handler).post(create_course_handler),
        )
        .route(
            "/courses/:id",
            get(get_course_handler)
                .put(update_course_handler)
                .delete(delete_course_handler),
        )
        .route("/get_all_courses/", get(list_courses_handler))
        .route("/create_course", post(create_course_handler))
        .route("/delete_course/:id", delete(delete_course_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
