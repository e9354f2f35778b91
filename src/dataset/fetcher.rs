//! Dataset Fetcher
//!
//! Downloads the course dataset and stages it on local disk.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{CatalogError, Result};

/// Source of dataset snapshots.
///
/// `fetch` refreshes the staged copy at [`DatasetSource::staging_path`] and
/// returns the downloaded bytes. On failure the staged copy is left as it was.
#[async_trait]
pub trait DatasetSource: Send + Sync + 'static {
    async fn fetch(&self) -> Result<Vec<u8>>;

    fn staging_path(&self) -> &Path;
}

/// Fetches the dataset over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    url: String,
    staging_path: PathBuf,
}

impl HttpFetcher {
    /// Creates a fetcher for `url` with an explicit request timeout.
    pub fn new(url: impl Into<String>, staging_path: impl Into<PathBuf>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Internal(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
            staging_path: staging_path.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.dataset_url.clone(),
            config.staging_path.clone(),
            config.fetch_timeout(),
        )
    }
}

#[async_trait]
impl DatasetSource for HttpFetcher {
    async fn fetch(&self) -> Result<Vec<u8>> {
        debug!(url = %self.url, "downloading dataset");

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::FetchStatus {
                status: status.as_u16(),
            });
        }
        let bytes = response.bytes().await?.to_vec();

        write_staging(&self.staging_path, &bytes).await?;
        info!(
            bytes = bytes.len(),
            path = %self.staging_path.display(),
            "dataset downloaded and staged"
        );
        Ok(bytes)
    }

    fn staging_path(&self) -> &Path {
        &self.staging_path
    }
}

/// Writes `bytes` to `path`, replacing any previous staged copy.
pub(crate) async fn write_staging(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| CatalogError::Load(format!("cannot create {}: {e}", parent.display())))?;
    }
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| CatalogError::Load(format!("cannot stage {}: {e}", path.display())))
}
