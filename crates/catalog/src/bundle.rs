//! Bundle price/stock aggregation.

use nursery_core::{Product, ProductId};
use rust_decimal::Decimal;

/// Aggregated figures for a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundleTotals {
    /// Sum of the constituents' effective prices.
    pub price: Decimal,
    /// Minimum constituent stock; a bundle sells only while every item is
    /// available.
    pub stock: u32,
}

/// Aggregate a bundle from its item list.
///
/// IDs that no longer resolve to a product are skipped silently. An empty
/// or fully unresolved list yields zero price and zero stock.
///
/// Called both at product-detail display time and when the admin saves a
/// bundle; the saved copy goes stale if a constituent changes afterwards,
/// so readers should prefer calling this over trusting stored fields.
#[must_use]
pub fn resolve_bundle(item_ids: &[ProductId], all_products: &[Product]) -> BundleTotals {
    let mut price = Decimal::ZERO;
    let mut stock: Option<u32> = None;
    for id in item_ids {
        if let Some(item) = all_products.iter().find(|p| p.id == *id) {
            price += item.effective_price();
            stock = Some(stock.map_or(item.stock, |s| s.min(item.stock)));
        }
    }
    BundleTotals {
        price,
        stock: stock.unwrap_or(0),
    }
}
