//! Category entity.

use serde::{Deserialize, Serialize};

use super::id::CategoryId;

/// A catalog category.
///
/// Categories form a forest via `parent_id`; root categories have no
/// parent. `show_image`, `sort_order` and `status` are optional in stored
/// documents, so they stay optional here and the accessor methods apply
/// the historical defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_image: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
}

impl Category {
    /// A category is enabled unless `status` is explicitly `false`.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.status.unwrap_or(true)
    }

    /// Sort key for sibling ordering; missing `sort_order` sorts first.
    #[must_use]
    pub fn sort_key(&self) -> i32 {
        self.sort_order.unwrap_or(0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_defaults_to_enabled() {
        let json = r#"{"id": 1, "name": "Cribs"}"#;
        let cat: Category = serde_json::from_str(json).unwrap();
        assert!(cat.is_enabled());
        assert_eq!(cat.sort_key(), 0);
        assert_eq!(cat.parent_id, None);
    }

    #[test]
    fn test_explicitly_disabled() {
        let json = r#"{"id": 3, "name": "Mattresses", "status": false, "sortOrder": 3}"#;
        let cat: Category = serde_json::from_str(json).unwrap();
        assert!(!cat.is_enabled());
        assert_eq!(cat.sort_key(), 3);
    }
}
