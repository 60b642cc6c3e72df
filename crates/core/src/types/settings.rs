//! Store-wide settings record.

use serde::{Deserialize, Serialize};

/// Storefront display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ru,
    #[default]
    En,
}

/// Global display/configuration flags. A single record, not a collection.
///
/// Every recognized field is enumerated here; unknown keys in stored
/// documents are dropped on load rather than carried around in an open
/// settings bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreSettings {
    pub name: String,
    pub description: String,
    pub logo_url: String,
    pub manager_contact: String,
    /// Show SKU on the product page.
    pub show_sku: bool,
    pub real_photos_enabled: bool,
    pub real_photos_label: String,
    pub real_photos: Vec<String>,
    /// When filtering by category, include products from descendant
    /// categories as well.
    pub show_products_from_subcategories: bool,
    pub language: Language,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            name: "Nursery Furniture".to_string(),
            description: "Cozy and safe furniture for your little one.".to_string(),
            logo_url: String::new(),
            manager_contact: String::new(),
            show_sku: true,
            real_photos_enabled: false,
            real_photos_label: "Photos from our customers".to_string(),
            real_photos: Vec::new(),
            show_products_from_subcategories: true,
            language: Language::En,
        }
    }
}
