//! Versioned full-store backup documents.
//!
//! A backup is a superset of the snapshot: same sections plus a format
//! version and capture timestamp, all sections optional so an older or
//! hand-trimmed file still restores what it carries.

use chrono::Utc;
use nursery_core::{Category, Product, Sticker, StoreSettings, StoreStats};
use serde::{Deserialize, Serialize};

use crate::store::Store;

/// Current backup format version.
pub const BACKUP_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    #[serde(default)]
    pub version: u32,
    /// Millisecond timestamp of the capture.
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<Product>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<StoreSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stickers: Option<Vec<Sticker>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<StoreStats>,
}

impl Backup {
    /// Capture the full current state of a store.
    #[must_use]
    pub fn capture(store: &Store) -> Self {
        Self {
            version: BACKUP_VERSION,
            timestamp: Utc::now().timestamp_millis(),
            products: Some(store.products().to_vec()),
            categories: Some(store.categories().to_vec()),
            settings: Some(store.settings().clone()),
            stickers: Some(store.stickers().to_vec()),
            stats: Some(*store.stats()),
        }
    }

    /// Pretty-printed JSON for the downloadable backup file.
    ///
    /// # Errors
    ///
    /// Returns the underlying encode error; practically unreachable for
    /// these types.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::snapshot;

    #[test]
    fn test_capture_carries_every_section() {
        let store = Store::from_snapshot(snapshot::embedded());
        let backup = Backup::capture(&store);
        assert_eq!(backup.version, BACKUP_VERSION);
        assert!(backup.timestamp > 0);
        assert!(backup.products.is_some());
        assert!(backup.categories.is_some());
        assert!(backup.settings.is_some());
        assert!(backup.stickers.is_some());
        assert!(backup.stats.is_some());
    }

    #[test]
    fn test_partial_document_deserializes() {
        let backup: Backup = serde_json::from_str(r#"{"products": []}"#).unwrap();
        assert_eq!(backup.version, 0);
        assert!(backup.products.is_some());
        assert!(backup.categories.is_none());
        assert!(backup.stats.is_none());
    }
}
