//! The central entity store and its mutation API.
//!
//! All collections live in one [`Store`] and change only through the
//! methods here, so every referential side effect (variant family sync,
//! favorites purge, child re-parenting) has exactly one implementation.
//!
//! Reads stay defensive: deleting a product does *not* purge it from other
//! products' `variants`/`bundle_items`, and deleting a category leaves its
//! products orphaned. Readers resolve-or-skip such dangling references.
//! The one write-time guard is the category cycle check - a parent
//! assignment that would make a category its own ancestor is rejected.

use chrono::Utc;
use nursery_catalog::{resolve_bundle, would_create_cycle};
use nursery_core::{
    Category, CategoryId, Product, ProductId, ProductVariant, Sticker, StickerId, StoreSettings,
    StoreStats,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::backup::Backup;
use crate::snapshot::{self, Snapshot};

/// Mutation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),
    #[error("category not found: {0}")]
    CategoryNotFound(CategoryId),
    #[error("sticker not found: {0}")]
    StickerNotFound(StickerId),
    #[error("parent assignment would create a category cycle at {0}")]
    CategoryCycle(CategoryId),
}

/// Counts reported by a product import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub updated: usize,
    pub inserted: usize,
}

impl ImportSummary {
    /// Total rows that made it into the store.
    #[must_use]
    pub const fn processed(&self) -> usize {
        self.updated + self.inserted
    }
}

/// The in-memory entity store.
///
/// Owns products, categories, stickers, settings, stats and the favorites
/// list. Collections are handed out as slices; callers never mutate them
/// directly.
#[derive(Debug, Clone, Default)]
pub struct Store {
    products: Vec<Product>,
    categories: Vec<Category>,
    settings: StoreSettings,
    stickers: Vec<Sticker>,
    stats: StoreStats,
    favorites: Vec<ProductId>,
}

impl Store {
    /// A fresh store with default settings and the seed sticker set, no
    /// products or categories.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stickers: Sticker::defaults(),
            ..Self::default()
        }
    }

    /// Build a store from a snapshot document. Absent sections keep their
    /// defaults, mirroring how a partial `db.json` seeds the app.
    #[must_use]
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut store = Self::new();
        store.apply_snapshot(snapshot);
        store
    }

    /// Overlay a snapshot onto the current state.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) {
        self.products = snapshot.products;
        self.categories = snapshot.categories;
        if let Some(settings) = snapshot.settings {
            self.settings = settings;
        }
        if let Some(stickers) = snapshot.stickers {
            self.stickers = stickers;
        }
        if let Some(stats) = snapshot.stats {
            self.stats = stats;
        }
    }

    /// Capture the current state as a snapshot, stamped with the current
    /// time.
    #[must_use]
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            products: self.products.clone(),
            categories: self.categories.clone(),
            settings: Some(self.settings.clone()),
            stickers: Some(self.stickers.clone()),
            stats: Some(self.stats),
            generated_at: Some(Utc::now().timestamp_millis()),
        }
    }

    // ----- accessors -------------------------------------------------

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub const fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    #[must_use]
    pub fn stickers(&self) -> &[Sticker] {
        &self.stickers
    }

    #[must_use]
    pub const fn stats(&self) -> &StoreStats {
        &self.stats
    }

    #[must_use]
    pub fn favorites(&self) -> &[ProductId] {
        &self.favorites
    }

    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    // ----- products --------------------------------------------------

    /// Add a new product. Assigns a timestamp ID when the draft carries
    /// `id == 0`, applies save-time normalization and prepends the product
    /// so it shows first in the admin list.
    pub fn add_product(&mut self, mut product: Product) -> ProductId {
        if product.id.as_i64() == 0 {
            product.id = ProductId::new(next_id());
        }
        self.normalize_for_save(&mut product, false);
        let id = product.id;
        self.products.insert(0, product);
        id
    }

    /// Update an existing product.
    ///
    /// Besides replacing the record, keeps the variant family coherent:
    /// when the product carries variants, its `variant_labels` and
    /// `variants` list are propagated to every other family member, so all
    /// members describe the same dimensions and combinations.
    ///
    /// # Errors
    ///
    /// [`StoreError::ProductNotFound`] when no product has this ID.
    pub fn update_product(&mut self, mut product: Product) -> Result<(), StoreError> {
        if !self.products.iter().any(|p| p.id == product.id) {
            return Err(StoreError::ProductNotFound(product.id));
        }
        self.normalize_for_save(&mut product, true);

        if product.variants.is_empty() {
            let id = product.id;
            for slot in &mut self.products {
                if slot.id == id {
                    *slot = product;
                    break;
                }
            }
            return Ok(());
        }

        let mut family: Vec<ProductId> =
            product.variants.iter().map(|v| v.product_id).collect();
        if !family.contains(&product.id) {
            family.push(product.id);
        }
        let labels = product.variant_labels.clone();
        let variants = product.variants.clone();
        let id = product.id;
        for slot in &mut self.products {
            if slot.id == id {
                *slot = product.clone();
            } else if family.contains(&slot.id) {
                slot.variant_labels.clone_from(&labels);
                slot.variants.clone_from(&variants);
            }
        }
        Ok(())
    }

    /// Delete a product and purge it from the favorites list.
    ///
    /// Other products' `variants` and `bundle_items` are *not* touched;
    /// the IDs go dangling and readers skip them.
    ///
    /// # Errors
    ///
    /// [`StoreError::ProductNotFound`] when no product has this ID.
    pub fn delete_product(&mut self, id: ProductId) -> Result<(), StoreError> {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        if self.products.len() == before {
            return Err(StoreError::ProductNotFound(id));
        }
        self.favorites.retain(|fav| *fav != id);
        Ok(())
    }

    /// Upsert imported products by case-insensitive SKU.
    ///
    /// A matching SKU updates the existing record in place, preserving its
    /// original ID; everything else is appended as-is.
    pub fn import_products(&mut self, imported: Vec<Product>) -> ImportSummary {
        let mut summary = ImportSummary::default();
        for mut incoming in imported {
            if let Some(existing) = self
                .products
                .iter_mut()
                .find(|p| p.sku_matches(&incoming.sku))
            {
                incoming.id = existing.id;
                *existing = incoming;
                summary.updated += 1;
            } else {
                self.products.push(incoming);
                summary.inserted += 1;
            }
        }
        info!(
            updated = summary.updated,
            inserted = summary.inserted,
            "import finished"
        );
        summary
    }

    /// Remove every product. Categories, stickers and settings stay.
    pub fn delete_all_products(&mut self) {
        self.products.clear();
        self.favorites.clear();
    }

    // ----- categories ------------------------------------------------

    /// Add a category. Assigns a timestamp ID when the draft carries
    /// `id == 0`.
    ///
    /// # Errors
    ///
    /// [`StoreError::CategoryCycle`] when the parent chain of
    /// `parent_id` already leads back to this category.
    pub fn add_category(&mut self, mut category: Category) -> Result<CategoryId, StoreError> {
        if category.id.as_i64() == 0 {
            category.id = CategoryId::new(next_id());
        }
        if would_create_cycle(&self.categories, category.id, category.parent_id) {
            return Err(StoreError::CategoryCycle(category.id));
        }
        let id = category.id;
        self.categories.push(category);
        Ok(id)
    }

    /// Update a category.
    ///
    /// # Errors
    ///
    /// [`StoreError::CategoryNotFound`] when the ID is unknown,
    /// [`StoreError::CategoryCycle`] when the new parent would make the
    /// category its own ancestor.
    pub fn update_category(&mut self, category: Category) -> Result<(), StoreError> {
        if !self.categories.iter().any(|c| c.id == category.id) {
            return Err(StoreError::CategoryNotFound(category.id));
        }
        if would_create_cycle(&self.categories, category.id, category.parent_id) {
            return Err(StoreError::CategoryCycle(category.id));
        }
        for slot in &mut self.categories {
            if slot.id == category.id {
                *slot = category;
                break;
            }
        }
        Ok(())
    }

    /// Delete a category. Direct children are re-parented to the root;
    /// products keep their `category_id` and become orphaned.
    ///
    /// # Errors
    ///
    /// [`StoreError::CategoryNotFound`] when the ID is unknown.
    pub fn delete_category(&mut self, id: CategoryId) -> Result<(), StoreError> {
        let before = self.categories.len();
        self.categories.retain(|c| c.id != id);
        if self.categories.len() == before {
            return Err(StoreError::CategoryNotFound(id));
        }
        for category in &mut self.categories {
            if category.parent_id == Some(id) {
                category.parent_id = None;
            }
        }
        Ok(())
    }

    /// Move `dragged` in front of `target` among the children of
    /// `new_parent`, renumbering the siblings 1..n. This is the
    /// drag-and-drop reorder of the admin category list and may re-parent
    /// the dragged category.
    ///
    /// Dropping a category onto itself, or onto a target that is not a
    /// child of `new_parent`, is a no-op.
    ///
    /// # Errors
    ///
    /// [`StoreError::CategoryNotFound`] for an unknown `dragged` ID,
    /// [`StoreError::CategoryCycle`] when the move would create a cycle.
    pub fn reorder_category(
        &mut self,
        dragged: CategoryId,
        target: CategoryId,
        new_parent: Option<CategoryId>,
    ) -> Result<(), StoreError> {
        if dragged == target {
            return Ok(());
        }
        let dragged_cat = self
            .categories
            .iter()
            .find(|c| c.id == dragged)
            .cloned()
            .ok_or(StoreError::CategoryNotFound(dragged))?;
        if would_create_cycle(&self.categories, dragged, new_parent) {
            return Err(StoreError::CategoryCycle(dragged));
        }

        let mut siblings: Vec<Category> = self
            .categories
            .iter()
            .filter(|c| c.parent_id == new_parent && c.id != dragged)
            .cloned()
            .collect();
        siblings.sort_by_key(Category::sort_key);
        let Some(target_index) = siblings.iter().position(|c| c.id == target) else {
            debug!(%dragged, %target, "drop target is not a sibling, ignoring");
            return Ok(());
        };
        siblings.insert(target_index, dragged_cat);

        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        for (index, sibling) in siblings.iter().enumerate() {
            let order = index as i32 + 1;
            for slot in &mut self.categories {
                if slot.id == sibling.id {
                    slot.sort_order = Some(order);
                    slot.parent_id = new_parent;
                }
            }
        }
        Ok(())
    }

    // ----- stickers --------------------------------------------------

    /// Create a sticker with a generated `s_<millis>` ID.
    pub fn add_sticker(
        &mut self,
        name: impl Into<String>,
        bg_color: impl Into<String>,
        text_color: impl Into<String>,
    ) -> StickerId {
        let id = StickerId::new(format!("s_{}", next_id()));
        self.stickers.push(Sticker {
            id: id.clone(),
            name: name.into(),
            bg_color: bg_color.into(),
            text_color: text_color.into(),
        });
        id
    }

    /// Delete a sticker. Products referencing it keep the dangling ID;
    /// readers skip it.
    ///
    /// # Errors
    ///
    /// [`StoreError::StickerNotFound`] when the ID is unknown.
    pub fn delete_sticker(&mut self, id: &StickerId) -> Result<(), StoreError> {
        let before = self.stickers.len();
        self.stickers.retain(|s| s.id != *id);
        if self.stickers.len() == before {
            return Err(StoreError::StickerNotFound(id.clone()));
        }
        Ok(())
    }

    /// Replace the sticker list wholesale.
    pub fn set_stickers(&mut self, stickers: Vec<Sticker>) {
        self.stickers = stickers;
    }

    // ----- settings, stats, favorites --------------------------------

    pub fn update_settings(&mut self, settings: StoreSettings) {
        self.settings = settings;
    }

    /// Replace the counters wholesale, used when loading persisted state.
    pub fn set_stats(&mut self, stats: StoreStats) {
        self.stats = stats;
    }

    /// Toggle a product in the favorites list. Returns whether the product
    /// is a favorite afterwards. Adding bumps the favorites counter;
    /// removing does not decrement it.
    pub fn toggle_favorite(&mut self, id: ProductId) -> bool {
        if self.favorites.contains(&id) {
            self.favorites.retain(|fav| *fav != id);
            false
        } else {
            self.favorites.push(id);
            self.stats.favorites_count += 1;
            true
        }
    }

    /// Count a submitted consultation request.
    pub fn record_consultation(&mut self) {
        self.stats.consultations_count += 1;
    }

    // ----- bulk operations -------------------------------------------

    /// Reset products and categories to the embedded seed dataset and
    /// clear the stats, keeping settings and stickers.
    pub fn reset(&mut self) {
        let seed = snapshot::embedded();
        self.products = seed.products;
        self.categories = seed.categories;
        self.stats = StoreStats::default();
        self.favorites.clear();
        info!("store reset to embedded dataset");
    }

    /// Wholesale-replace state from a backup document. Sections missing
    /// from the backup keep their current value.
    pub fn restore(&mut self, backup: Backup) {
        if let Some(products) = backup.products {
            self.products = products;
        }
        if let Some(categories) = backup.categories {
            self.categories = categories;
        }
        if let Some(settings) = backup.settings {
            self.settings = settings;
        }
        if let Some(stickers) = backup.stickers {
            self.stickers = stickers;
        }
        if let Some(stats) = backup.stats {
            self.stats = stats;
        }
        info!(version = backup.version, "store restored from backup");
    }

    // ----- save-time normalization -----------------------------------

    /// Repair variant/bundle consistency before a product is stored.
    ///
    /// - empty variant labels are dropped and the product's own values are
    ///   padded/truncated to the label count;
    /// - on edit, the product's own entry in its `variants` list is
    ///   inserted or refreshed;
    /// - every variant tuple is padded/truncated to the label count;
    /// - bundle price/stock are recomputed from the current constituents;
    ///   non-bundles lose any leftover `bundle_items`;
    /// - a blank SKU gets a generated `MAN-xxxx` one.
    fn normalize_for_save(&self, product: &mut Product, editing: bool) {
        product.variant_labels.retain(|l| !l.trim().is_empty());
        let dims = product.variant_labels.len();
        product.variant_values.resize(dims, String::new());

        if editing && !product.variants.is_empty() {
            let own = ProductVariant {
                product_id: product.id,
                values: product.variant_values.clone(),
            };
            if let Some(entry) = product
                .variants
                .iter_mut()
                .find(|v| v.product_id == product.id)
            {
                *entry = own;
            } else {
                product.variants.push(own);
            }
        }
        for variant in &mut product.variants {
            variant.values.resize(dims, String::new());
        }

        if product.is_bundle {
            if !product.bundle_items.is_empty() {
                let totals = resolve_bundle(&product.bundle_items, &self.products);
                product.price = totals.price;
                product.stock = totals.stock;
            }
        } else {
            product.bundle_items.clear();
        }

        if product.sku.trim().is_empty() {
            product.sku = format!("MAN-{:04}", next_id().rem_euclid(10_000));
        }
    }
}

/// Millisecond-timestamp IDs, as the store has always assigned them.
/// Two inserts within the same millisecond can collide; imports avoid this
/// by spreading row indexes over a base timestamp.
fn next_id() -> i64 {
    Utc::now().timestamp_millis()
}
