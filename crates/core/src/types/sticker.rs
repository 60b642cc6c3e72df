//! Sticker (label tag) entity.

use serde::{Deserialize, Serialize};

use super::id::StickerId;

/// A colored label tag shown on product cards, referenced by ID from
/// `Product::sticker_ids`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sticker {
    pub id: StickerId,
    pub name: String,
    pub bg_color: String,
    pub text_color: String,
}

impl Sticker {
    /// The default sticker set seeded into a fresh store.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        [
            ("sale", "Sale", "#ef4444"),
            ("new", "New", "#22c55e"),
            ("hit", "Popular", "#a855f7"),
            ("rec", "Recommended", "#f97316"),
        ]
        .into_iter()
        .map(|(id, name, bg)| Self {
            id: StickerId::from(id),
            name: name.to_string(),
            bg_color: bg.to_string(),
            text_color: "#ffffff".to_string(),
        })
        .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_color_fields_use_camel_case() {
        let sticker = Sticker::defaults().into_iter().next().unwrap();
        let json = serde_json::to_value(&sticker).unwrap();
        assert_eq!(json["bgColor"], "#ef4444");
        assert_eq!(json["textColor"], "#ffffff");
    }
}
