//! Nursery Core - Shared entity types.
//!
//! This crate provides the entity model used across all nursery-store
//! components:
//! - `catalog` - Read-side filtering, sorting and variant resolution
//! - `admin` - Mutation layer, import/export and persistence
//! - `cli` - Command-line tools for snapshot and data management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! filesystem access. Every struct serializes with the camelCase field
//! names used by the store's `db.json` snapshot format, so documents
//! produced by older deployments load unchanged.
//!
//! # Modules
//!
//! - [`types`] - Entities (`Product`, `Category`, `Sticker`, settings and
//!   stats records) and newtype wrappers for type-safe IDs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
