//! In-process dataset source for unit tests.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::dataset::fetcher::write_staging;
use crate::dataset::DatasetSource;
use crate::error::{CatalogError, Result};

#[derive(Debug)]
struct State {
    body: String,
    fail_status: Option<u16>,
}

/// Serves a fixed CSV body, staging it like the HTTP fetcher does.
///
/// Clones share the body, failure switch and call counter.
#[derive(Debug, Clone)]
pub(crate) struct StaticSource {
    state: Arc<Mutex<State>>,
    fetch_calls: Arc<AtomicU64>,
    staging_path: PathBuf,
}

impl StaticSource {
    pub(crate) fn new(dir: &Path, body: &str) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                body: body.to_string(),
                fail_status: None,
            })),
            fetch_calls: Arc::new(AtomicU64::new(0)),
            staging_path: dir.join("university.csv"),
        }
    }

    pub(crate) fn set_body(&self, body: &str) {
        let mut state = self.state.lock().unwrap();
        state.body = body.to_string();
        state.fail_status = None;
    }

    pub(crate) fn fail_with(&self, status: u16) {
        self.state.lock().unwrap().fail_status = Some(status);
    }

    pub(crate) fn fetch_calls(&self) -> u64 {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DatasetSource for StaticSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let (body, fail_status) = {
            let state = self.state.lock().unwrap();
            (state.body.clone(), state.fail_status)
        };
        if let Some(status) = fail_status {
            return Err(CatalogError::FetchStatus { status });
        }
        write_staging(&self.staging_path, body.as_bytes()).await?;
        Ok(body.into_bytes())
    }

    fn staging_path(&self) -> &Path {
        &self.staging_path
    }
}
