//! Nursery Admin - mutation layer and data management.
//!
//! This crate owns every write path of the store:
//!
//! - [`store`] - The central [`Store`](store::Store) holding all entity
//!   collections behind an explicit mutation API
//! - [`csv`] - Semicolon-delimited product import/export
//! - [`snapshot`] - The `db.json` document, remote fetch with proxy
//!   fallbacks and the embedded fallback dataset
//! - [`backup`] - Versioned full-store backup and restore
//! - [`persist`] - Keyed JSON file persistence (the localStorage analogue)
//! - [`auth`] - Placeholder admin phone check
//! - [`config`] - Environment-driven configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod backup;
pub mod config;
pub mod csv;
pub mod persist;
pub mod snapshot;
pub mod store;

pub use backup::Backup;
pub use config::{AdminConfig, ConfigError};
pub use persist::{LocalStore, PersistError};
pub use snapshot::{Snapshot, SnapshotError};
pub use store::{Store, StoreError};
