//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Dataset endpoint used when `DATASET_URL` is not set.
pub const DEFAULT_DATASET_URL: &str =
    "https://api.mockaroo.com/api/501b2790?count=100&key=8683a1c0";

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// External endpoint serving the CSV dataset
    pub dataset_url: String,
    /// Local path the fetched dataset is staged at
    pub staging_path: PathBuf,
    /// Seconds a record lives after its CreatedAt timestamp
    pub record_ttl: u64,
    /// Seconds between emptiness checks
    pub poll_interval: u64,
    /// Seconds between storage TTL sweeps
    pub sweep_interval: u64,
    /// Timeout in seconds for the dataset download
    pub fetch_timeout: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DATASET_URL` - Dataset endpoint (default: mockaroo course feed)
    /// - `STAGING_PATH` - Staging file path (default: university.csv)
    /// - `RECORD_TTL` - Record TTL in seconds (default: 600)
    /// - `POLL_INTERVAL` - Emptiness check frequency in seconds (default: 30)
    /// - `SWEEP_INTERVAL` - TTL sweep frequency in seconds (default: 60)
    /// - `FETCH_TIMEOUT` - Download timeout in seconds (default: 30)
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            dataset_url: env::var("DATASET_URL").unwrap_or(defaults.dataset_url),
            staging_path: env::var("STAGING_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.staging_path),
            record_ttl: parse_env("RECORD_TTL").unwrap_or(defaults.record_ttl),
            poll_interval: parse_env("POLL_INTERVAL").unwrap_or(defaults.poll_interval),
            sweep_interval: parse_env("SWEEP_INTERVAL").unwrap_or(defaults.sweep_interval),
            fetch_timeout: parse_env("FETCH_TIMEOUT").unwrap_or(defaults.fetch_timeout),
            server_port: parse_env("SERVER_PORT").unwrap_or(defaults.server_port),
        }
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.record_ttl)
    }

    pub fn poll_every(&self) -> Duration {
        Duration::from_secs(self.poll_interval)
    }

    pub fn sweep_every(&self) -> Duration {
        Duration::from_secs(self.sweep_interval)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout)
    }
}

fn parse_env<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_url: DEFAULT_DATASET_URL.to_string(),
            staging_path: PathBuf::from("university.csv"),
            record_ttl: 600,
            poll_interval: 30,
            sweep_interval: 60,
            fetch_timeout: 30,
            server_port: 8000,
        }
    }
}
