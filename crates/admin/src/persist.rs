//! Keyed JSON file persistence.
//!
//! The store's state survives restarts as one small JSON file per logical
//! key inside a data directory, the file-system analogue of browser
//! localStorage. Reads degrade: a missing or corrupt file logs a warning
//! and yields the caller's default instead of failing the whole load.

use std::fs;
use std::path::{Path, PathBuf};

use nursery_core::{Category, Product, Sticker, StoreSettings, StoreStats};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::snapshot;
use crate::store::Store;

/// Well-known persistence keys.
pub mod keys {
    pub const PRODUCTS: &str = "db_products";
    pub const CATEGORIES: &str = "db_categories";
    pub const SETTINGS: &str = "store_settings";
    pub const STICKERS: &str = "store_stickers";
    pub const STATS: &str = "store_stats";
    pub const ADMIN_PHONE: &str = "admin_phone";
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A directory of keyed JSON state files.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Open (and create if needed) the data directory.
    ///
    /// # Errors
    ///
    /// [`PersistError::Io`] when the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read a key, degrading to `None` on absence or corruption.
    #[must_use]
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.path_for(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                warn!(key, %err, "failed to read state file");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, %err, "state file is corrupt, ignoring");
                None
            }
        }
    }

    /// Write a key atomically (write to a sibling temp file, then rename).
    ///
    /// # Errors
    ///
    /// [`PersistError`] on encode or filesystem failure.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), PersistError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(value)?)?;
        fs::rename(&tmp, &path)?;
        debug!(key, "state file written");
        Ok(())
    }

    /// Delete a key. Absence is not an error.
    ///
    /// # Errors
    ///
    /// [`PersistError::Io`] on any other filesystem failure.
    pub fn remove(&self, key: &str) -> Result<(), PersistError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Assemble a [`Store`] from the persisted keys. When no products have
    /// ever been saved, seeds from the embedded dataset, mirroring first
    /// boot.
    #[must_use]
    pub fn load_store(&self) -> Store {
        let products: Option<Vec<Product>> = self.load(keys::PRODUCTS);
        let categories: Option<Vec<Category>> = self.load(keys::CATEGORIES);
        let mut store = if products.is_none() && categories.is_none() {
            debug!("no persisted state, seeding from the embedded dataset");
            Store::from_snapshot(snapshot::embedded())
        } else {
            Store::from_snapshot(snapshot::Snapshot {
                products: products.unwrap_or_default(),
                categories: categories.unwrap_or_default(),
                ..snapshot::Snapshot::default()
            })
        };
        if let Some(settings) = self.load::<StoreSettings>(keys::SETTINGS) {
            store.update_settings(settings);
        }
        if let Some(stickers) = self.load::<Vec<Sticker>>(keys::STICKERS) {
            store.set_stickers(stickers);
        }
        if let Some(stats) = self.load::<StoreStats>(keys::STATS) {
            store.set_stats(stats);
        }
        store
    }

    /// Persist every section of a store under its key.
    ///
    /// # Errors
    ///
    /// [`PersistError`] on the first failing write.
    pub fn save_store(&self, store: &Store) -> Result<(), PersistError> {
        self.save(keys::PRODUCTS, &store.products())?;
        self.save(keys::CATEGORIES, &store.categories())?;
        self.save(keys::SETTINGS, store.settings())?;
        self.save(keys::STICKERS, &store.stickers())?;
        self.save(keys::STATS, store.stats())?;
        Ok(())
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_remove_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let local = LocalStore::open(dir.path()).unwrap();

        local.save(keys::ADMIN_PHONE, &"+1 555").unwrap();
        assert_eq!(local.load::<String>(keys::ADMIN_PHONE).unwrap(), "+1 555");

        local.remove(keys::ADMIN_PHONE).unwrap();
        assert!(local.load::<String>(keys::ADMIN_PHONE).is_none());
        // Removing twice stays fine.
        local.remove(keys::ADMIN_PHONE).unwrap();
    }

    #[test]
    fn test_corrupt_file_degrades_to_none() {
        let dir = tempfile::tempdir().unwrap();
        let local = LocalStore::open(dir.path()).unwrap();
        std::fs::write(dir.path().join("db_products.json"), "{nope").unwrap();
        assert!(local.load::<Vec<Product>>(keys::PRODUCTS).is_none());
    }

    #[test]
    fn test_load_store_seeds_embedded_on_first_boot() {
        let dir = tempfile::tempdir().unwrap();
        let local = LocalStore::open(dir.path()).unwrap();
        let store = local.load_store();
        assert!(!store.products().is_empty());
        assert!(!store.categories().is_empty());
    }

    #[test]
    fn test_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let local = LocalStore::open(dir.path()).unwrap();
        let mut store = local.load_store();
        let before = store.products().len();
        store.delete_all_products();
        local.save_store(&store).unwrap();

        let reloaded = local.load_store();
        assert_ne!(reloaded.products().len(), before);
        assert!(reloaded.products().is_empty());
        // Categories were persisted, so this is not the embedded seed.
        assert!(!reloaded.categories().is_empty());
    }
}
