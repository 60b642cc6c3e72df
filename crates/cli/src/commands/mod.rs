//! CLI command implementations.

use nursery_admin::config::ConfigError;
use nursery_admin::persist::PersistError;
use nursery_admin::snapshot::SnapshotError;
use nursery_admin::{AdminConfig, LocalStore};
use thiserror::Error;

pub mod export;
pub mod fetch;
pub mod import;
pub mod restore;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("no snapshot URL given and NURSERY_DB_URL is not set")]
    MissingUrl,
    #[error("refusing to overwrite current state without --yes")]
    ConfirmationRequired,
}

/// Load config and open the data directory, shared by every command.
pub fn context() -> Result<(AdminConfig, LocalStore), CommandError> {
    let config = AdminConfig::from_env()?;
    let local = LocalStore::open(config.data_dir.clone())?;
    Ok((config, local))
}
