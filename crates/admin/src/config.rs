//! Admin tooling configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `NURSERY_DATA_DIR` - Directory for keyed JSON state (default: `./data`)
//! - `NURSERY_DB_URL` - URL of the published `db.json` snapshot
//! - `NURSERY_ADMIN_PHONE` - Phone number accepted by the admin login
//! - `NURSERY_PROXY_TIMEOUT_SECS` - Per-attempt timeout for snapshot
//!   fetches (default: 5)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_PROXY_TIMEOUT_SECS: u64 = 5;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin tooling configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Directory holding the keyed JSON state files
    pub data_dir: PathBuf,
    /// Remote `db.json` URL, when a published snapshot exists
    pub remote_db_url: Option<String>,
    /// Phone number accepted by the admin login
    pub admin_phone: Option<String>,
    /// Per-attempt timeout for snapshot fetch routes
    pub proxy_timeout: Duration,
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparsable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir =
            PathBuf::from(get_env_or_default("NURSERY_DATA_DIR", DEFAULT_DATA_DIR));
        let proxy_timeout_secs = match std::env::var("NURSERY_PROXY_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar(
                    "NURSERY_PROXY_TIMEOUT_SECS".to_string(),
                    e.to_string(),
                )
            })?,
            Err(_) => DEFAULT_PROXY_TIMEOUT_SECS,
        };

        Ok(Self {
            data_dir,
            remote_db_url: get_optional_env("NURSERY_DB_URL"),
            admin_phone: get_optional_env("NURSERY_ADMIN_PHONE"),
            proxy_timeout: Duration::from_secs(proxy_timeout_secs),
        })
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            remote_db_url: None,
            admin_phone: None,
            proxy_timeout: Duration::from_secs(DEFAULT_PROXY_TIMEOUT_SECS),
        }
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AdminConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.proxy_timeout, Duration::from_secs(5));
        assert!(config.remote_db_url.is_none());
        assert!(config.admin_phone.is_none());
    }
}
