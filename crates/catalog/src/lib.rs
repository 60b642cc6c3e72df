//! Nursery Catalog - read-side catalog logic.
//!
//! Pure functions over the entity collections owned by the store: no I/O,
//! no mutation. Everything here resolves references defensively - an ID
//! pointing at a product or category that no longer exists is skipped,
//! never an error.
//!
//! # Modules
//!
//! - [`tree`] - Category descendant sets and sibling ordering
//! - [`filter`] - The search/category filter and sort pipeline
//! - [`variant`] - Multi-dimensional variant switching
//! - [`bundle`] - Bundle price/stock aggregation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod bundle;
pub mod filter;
pub mod tree;
pub mod variant;

pub use bundle::{BundleTotals, resolve_bundle};
pub use filter::{CHAT_SEARCH_LIMIT, SortOption, chat_search, favorite_products, filter_and_sort};
pub use tree::{descendant_ids, visible_children, would_create_cycle};
pub use variant::{dimension_values, switch_variant};
