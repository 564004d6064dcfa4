//! Client configuration.
//!
//! Configuration comes from the environment (a `.env` file is loaded by the
//! binary before this runs):
//!
//! - `ORDERBOT_API_BASE` (or `VITE_API_BASE_URL`): backend base URL
//! - `ORDERBOT_STORAGE_TTL_MS` (or `VITE_LOCAL_STORAGE_TTL`): cache ttl in ms,
//!   zero or non-numeric meaning "never expire"
//! - `ORDERBOT_REQUEST_TIMEOUT_SECS`: HTTP timeout, default 30
//! - `ORDERBOT_STORAGE_DIR`: where stored items live, default
//!   `<cache dir>/orderbot`

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::cache::Ttl;

/// Application name used for the storage directory path
const APP_NAME: &str = "orderbot";

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not find cache directory")]
    NoCacheDir,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base: String,
    pub storage_ttl: Ttl,
    pub request_timeout: Duration,
    pub storage_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            storage_ttl: Ttl::NEVER,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            storage_dir: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Missing or unparsable values fall
    /// back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |keys: &[&str]| keys.iter().find_map(|k| lookup(*k));

        let api_base = first(&["ORDERBOT_API_BASE", "VITE_API_BASE_URL"])
            .map(|base| base.trim().trim_end_matches('/').to_string())
            .unwrap_or_default();

        let storage_ttl = first(&["ORDERBOT_STORAGE_TTL_MS", "VITE_LOCAL_STORAGE_TTL"])
            .map(|raw| Ttl::parse(&raw))
            .unwrap_or(Ttl::NEVER);

        let request_timeout = lookup("ORDERBOT_REQUEST_TIMEOUT_SECS")
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));

        let storage_dir = lookup("ORDERBOT_STORAGE_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        Self {
            api_base,
            storage_ttl,
            request_timeout,
            storage_dir,
        }
    }

    pub fn storage_dir(&self) -> Result<PathBuf, ConfigError> {
        if let Some(ref dir) = self.storage_dir {
            return Ok(dir.clone());
        }
        let cache_dir = dirs::cache_dir().ok_or(ConfigError::NoCacheDir)?;
        Ok(cache_dir.join(APP_NAME))
    }
}
