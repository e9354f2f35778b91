//! Dataset Module
//!
//! Fetching, parsing and loading of the external course dataset.
//!
//! # Flow
//! - Fetcher: downloads the CSV and stages it on disk
//! - Parser: turns staged rows into course fields
//! - Loader: stamps the rows and swaps them into the store

mod fetcher;
mod loader;
mod parser;

#[cfg(test)]
pub(crate) mod testing;

pub use fetcher::{DatasetSource, HttpFetcher};
pub use loader::{DatasetLoader, LoadReport};
pub use parser::parse_courses;
