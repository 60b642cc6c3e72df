//! Product entity, variants and attributes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId, StickerId};

/// A named characteristic displayed on the product page
/// (e.g. "Material: birch").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub text: String,
}

/// One entry in a product's variant family.
///
/// `values` holds the value for each labeled dimension, in the same order
/// as the owning product's `variant_labels`
/// (e.g. labels `["Color", "Size"]`, values `["White", "120x60"]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub product_id: ProductId,
    pub values: Vec<String>,
}

/// A catalog product.
///
/// Products referenced from `variants` or `bundle_items` are plain IDs,
/// resolved against the full product collection at read time. Dangling
/// references are skipped, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub category_id: CategoryId,
    pub name: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_price: Option<Decimal>,
    /// Main image URL.
    pub image: String,
    /// Gallery, conventionally starting with the main image.
    #[serde(default)]
    pub images: Vec<String>,
    pub sku: String,
    pub stock: u32,
    /// Disabled products are hidden from every catalog view.
    pub status: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    /// Names of the variant dimensions (at most two in practice).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variant_labels: Vec<String>,
    /// This product's own value for each dimension.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variant_values: Vec<String>,
    /// The full variant family, including this product itself.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<ProductVariant>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sticker_ids: Vec<StickerId>,
    /// Bundles derive `price` and `stock` from their constituent items;
    /// the stored values are a denormalized copy from the last save.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_bundle: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bundle_items: Vec<ProductId>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(v: &bool) -> bool {
    !*v
}

impl Product {
    /// The price actually charged: `special_price` when set, else `price`.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        self.special_price.unwrap_or(self.price)
    }

    /// Discount amount, zero when no special price is set.
    #[must_use]
    pub fn discount(&self) -> Decimal {
        self.special_price
            .map_or(Decimal::ZERO, |special| self.price - special)
    }

    /// Case-insensitive SKU comparison, the natural dedup key on import.
    #[must_use]
    pub fn sku_matches(&self, sku: &str) -> bool {
        self.sku.to_lowercase() == sku.to_lowercase()
    }
}
