//! Entity types for the nursery store.
//!
//! All types serialize with camelCase field names for `db.json`
//! compatibility.

pub mod category;
pub mod id;
pub mod product;
pub mod settings;
pub mod stats;
pub mod sticker;

pub use category::Category;
pub use id::*;
pub use product::{Attribute, Product, ProductVariant};
pub use settings::{Language, StoreSettings};
pub use stats::StoreStats;
pub use sticker::Sticker;
