//! Course Catalog - A course records service with a self-refreshing dataset
//!
//! Serves CRUD operations over course records, loads them from an external
//! CSV dataset, expires them after a fixed TTL and reloads the dataset once
//! the store has drained.

pub mod api;
pub mod config;
pub mod dataset;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use dataset::{DatasetLoader, HttpFetcher};
pub use error::{CatalogError, Result};
pub use tasks::{spawn_ttl_sweeper, EmptinessMonitor};
