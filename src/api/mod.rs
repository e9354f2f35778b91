//! API Module
//!
//! HTTP handlers and routing for the course catalog REST API.
//!
//! # Endpoints
//! - `GET /` - Service description
//! - `GET|POST /courses` - List or create courses
//! - `GET|PUT|DELETE /courses/:id` - Read, update or delete one course
//! - `GET /stats` - Dataset lifecycle statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
