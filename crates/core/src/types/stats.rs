//! Store usage counters.

use serde::{Deserialize, Serialize};

/// Global counters incremented as side effects of shopper actions.
/// Counters only ever grow; nothing decrements them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreStats {
    /// Total number of times any product was added to favorites.
    pub favorites_count: u64,
    /// Total number of consultation requests submitted.
    pub consultations_count: u64,
}
