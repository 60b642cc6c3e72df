//! The product filter/sort pipeline.
//!
//! Mirrors what the catalog screen shows: a search query takes precedence
//! over category selection, the catalog root shows category tiles only (no
//! "all products" view), and sorting is a stable reorder of the filtered
//! set. No pagination - the whole result is returned.

use nursery_core::{Category, CategoryId, Product, ProductId, StoreSettings};

use crate::tree::descendant_ids;

/// Catalog sort orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOption {
    /// Insertion order, untouched.
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    DiscountDesc,
    DiscountAsc,
}

/// Filter and sort the catalog.
///
/// Policy:
/// - A non-empty (trimmed) `query` matches enabled products whose name or
///   SKU contains it case-insensitively; category selection is ignored
///   while searching.
/// - With no query and no selected category the result is empty.
/// - Otherwise membership is exact `category_id` equality, widened to the
///   descendant set when `settings.show_products_from_subcategories` is on.
/// - Sorting is stable; `SortOption::Default` preserves input order.
#[must_use]
pub fn filter_and_sort<'a>(
    products: &'a [Product],
    query: &str,
    selected_category: Option<CategoryId>,
    categories: &[Category],
    settings: &StoreSettings,
    sort: SortOption,
) -> Vec<&'a Product> {
    let query = query.trim();

    let mut result: Vec<&Product> = if query.is_empty() {
        let Some(selected) = selected_category else {
            return Vec::new();
        };
        if settings.show_products_from_subcategories {
            let allowed = descendant_ids(categories, selected);
            products
                .iter()
                .filter(|p| p.status && allowed.contains(&p.category_id))
                .collect()
        } else {
            products
                .iter()
                .filter(|p| p.status && p.category_id == selected)
                .collect()
        }
    } else {
        let needle = query.to_lowercase();
        products
            .iter()
            .filter(|p| {
                p.status
                    && (p.name.to_lowercase().contains(&needle)
                        || p.sku.to_lowercase().contains(&needle))
            })
            .collect()
    };

    match sort {
        SortOption::Default => {}
        SortOption::PriceAsc => {
            result.sort_by(|a, b| a.effective_price().cmp(&b.effective_price()));
        }
        SortOption::PriceDesc => {
            result.sort_by(|a, b| b.effective_price().cmp(&a.effective_price()));
        }
        SortOption::DiscountDesc => result.sort_by(|a, b| b.discount().cmp(&a.discount())),
        SortOption::DiscountAsc => result.sort_by(|a, b| a.discount().cmp(&b.discount())),
    }
    result
}

/// Enabled products from the favorites list, in catalog order.
#[must_use]
pub fn favorite_products<'a>(products: &'a [Product], favorites: &[ProductId]) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| p.status && favorites.contains(&p.id))
        .collect()
}

/// Result cap for [`chat_search`]; the assistant quotes a handful of
/// products, not a listing.
pub const CHAT_SEARCH_LIMIT: usize = 5;

/// Quick lookup behind the chat assistant.
///
/// Resolution order differs from the catalog search: a query that matches
/// a category *name* (case-insensitive substring, first match wins)
/// returns that category's direct products; only when no category matches
/// does it fall back to the name/SKU search. Either way the result is
/// capped at [`CHAT_SEARCH_LIMIT`] and disabled products are excluded.
#[must_use]
pub fn chat_search<'a>(
    products: &'a [Product],
    categories: &[Category],
    query: &str,
) -> Vec<&'a Product> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let matched_category = categories
        .iter()
        .find(|c| c.name.to_lowercase().contains(&needle));

    let mut results: Vec<&Product> = match matched_category {
        Some(category) => products
            .iter()
            .filter(|p| p.status && p.category_id == category.id)
            .collect(),
        None => products
            .iter()
            .filter(|p| {
                p.status
                    && (p.name.to_lowercase().contains(&needle)
                        || p.sku.to_lowercase().contains(&needle))
            })
            .collect(),
    };
    results.truncate(CHAT_SEARCH_LIMIT);
    results
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use nursery_core::Attribute;
    use rust_decimal::Decimal;

    fn product(id: i64, category: i64, name: &str, sku: &str, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            category_id: CategoryId::new(category),
            name: name.to_string(),
            price: Decimal::from(price),
            special_price: None,
            image: String::new(),
            images: Vec::new(),
            sku: sku.to_string(),
            stock: 1,
            status: true,
            description: None,
            attributes: Vec::<Attribute>::new(),
            variant_labels: Vec::new(),
            variant_values: Vec::new(),
            variants: Vec::new(),
            sticker_ids: Vec::new(),
            is_bundle: false,
            bundle_items: Vec::new(),
        }
    }

    fn category(id: i64, parent: Option<i64>) -> Category {
        Category {
            id: CategoryId::new(id),
            name: format!("cat-{id}"),
            parent_id: parent.map(CategoryId::new),
            image: None,
            show_image: None,
            sort_order: None,
            status: None,
        }
    }

    fn ids(result: &[&Product]) -> Vec<i64> {
        result.iter().map(|p| p.id.as_i64()).collect()
    }

    #[test]
    fn test_no_category_and_no_query_is_empty() {
        let products = vec![product(1, 1, "Crib", "A-1", 100)];
        let result = filter_and_sort(
            &products,
            "",
            None,
            &[],
            &StoreSettings::default(),
            SortOption::Default,
        );
        assert!(result.is_empty());
    }

    #[test]
    fn test_search_matches_name_or_sku_and_ignores_category() {
        let mut disabled = product(3, 2, "Crib Deluxe", "C-3", 300);
        disabled.status = false;
        let products = vec![
            product(1, 1, "Crib Classic", "A-1", 100),
            product(2, 2, "Dresser", "CRIB-2", 200),
            disabled,
            product(4, 3, "Mattress", "D-4", 50),
        ];
        // Category selection present but irrelevant while searching.
        let result = filter_and_sort(
            &products,
            "  crib ",
            Some(CategoryId::new(3)),
            &[],
            &StoreSettings::default(),
            SortOption::Default,
        );
        assert_eq!(ids(&result), vec![1, 2]);
    }

    #[test]
    fn test_category_filter_with_and_without_subcategories() {
        let categories = vec![category(1, None), category(2, Some(1))];
        let products = vec![
            product(10, 1, "Parent item", "P-1", 100),
            product(11, 2, "Child item", "P-2", 200),
            product(12, 3, "Elsewhere", "P-3", 300),
        ];

        let mut settings = StoreSettings::default();
        settings.show_products_from_subcategories = true;
        let wide = filter_and_sort(
            &products,
            "",
            Some(CategoryId::new(1)),
            &categories,
            &settings,
            SortOption::Default,
        );
        assert_eq!(ids(&wide), vec![10, 11]);

        settings.show_products_from_subcategories = false;
        let narrow = filter_and_sort(
            &products,
            "",
            Some(CategoryId::new(1)),
            &categories,
            &settings,
            SortOption::Default,
        );
        assert_eq!(ids(&narrow), vec![10]);
    }

    #[test]
    fn test_price_sorts_use_effective_price_and_reverse() {
        let mut discounted = product(1, 1, "A", "A", 500);
        discounted.special_price = Some(Decimal::from(150));
        let products = vec![
            discounted,
            product(2, 1, "B", "B", 100),
            product(3, 1, "C", "C", 300),
        ];
        let settings = StoreSettings::default();
        let selected = Some(CategoryId::new(1));
        let cats = vec![category(1, None)];

        let asc = filter_and_sort(&products, "", selected, &cats, &settings, SortOption::PriceAsc);
        assert_eq!(ids(&asc), vec![2, 1, 3]);

        let desc =
            filter_and_sort(&products, "", selected, &cats, &settings, SortOption::PriceDesc);
        let mut reversed = ids(&asc);
        reversed.reverse();
        assert_eq!(ids(&desc), reversed);
    }

    #[test]
    fn test_discount_desc_puts_discounted_first() {
        // A: price 6490 special 5990; B: price 6490 no special => [A, B]
        let mut a = product(1, 1, "A", "A", 6490);
        a.special_price = Some(Decimal::from(5990));
        let b = product(2, 1, "B", "B", 6490);
        let products = vec![b, a];
        let result = filter_and_sort(
            &products,
            "",
            Some(CategoryId::new(1)),
            &[category(1, None)],
            &StoreSettings::default(),
            SortOption::DiscountDesc,
        );
        assert_eq!(ids(&result), vec![1, 2]);
    }

    #[test]
    fn test_default_sort_preserves_insertion_order() {
        let products = vec![
            product(3, 1, "C", "C", 300),
            product(1, 1, "A", "A", 100),
            product(2, 1, "B", "B", 200),
        ];
        let result = filter_and_sort(
            &products,
            "",
            Some(CategoryId::new(1)),
            &[category(1, None)],
            &StoreSettings::default(),
            SortOption::Default,
        );
        assert_eq!(ids(&result), vec![3, 1, 2]);
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let products = vec![
            product(1, 1, "Crib", "A-1", 100),
            product(2, 1, "Dresser", "B-2", 200),
        ];
        let settings = StoreSettings::default();
        let once = filter_and_sort(&products, "crib", None, &[], &settings, SortOption::Default);
        let once_owned: Vec<Product> = once.iter().map(|p| (*p).clone()).collect();
        let twice =
            filter_and_sort(&once_owned, "crib", None, &[], &settings, SortOption::Default);
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn test_favorites_respect_status_and_order() {
        let mut hidden = product(2, 1, "B", "B", 200);
        hidden.status = false;
        let products = vec![product(1, 1, "A", "A", 100), hidden, product(3, 1, "C", "C", 300)];
        let favorites = vec![ProductId::new(3), ProductId::new(2), ProductId::new(1)];
        let result = favorite_products(&products, &favorites);
        assert_eq!(ids(&result), vec![1, 3]);
    }

    #[test]
    fn test_chat_search_prefers_category_name_match() {
        let mut cribs = category(1, None);
        cribs.name = "Cribs".to_string();
        let categories = vec![cribs, category(2, None)];
        // Product 20 has "crib" in its name but lives elsewhere; the
        // category-name match wins and returns category 1 only.
        let products = vec![
            product(10, 1, "Bambino", "A-1", 100),
            product(20, 2, "Crib sheet", "B-2", 50),
        ];
        let result = chat_search(&products, &categories, " crib ");
        assert_eq!(ids(&result), vec![10]);
    }

    #[test]
    fn test_chat_search_falls_back_to_name_and_sku() {
        let categories = vec![category(1, None)];
        let mut hidden = product(3, 1, "Dresser deluxe", "D-3", 300);
        hidden.status = false;
        let products = vec![
            product(1, 1, "Dresser", "D-1", 100),
            product(2, 1, "Mattress", "DRS-2", 200),
            hidden,
        ];
        let result = chat_search(&products, &categories, "drs");
        assert_eq!(ids(&result), vec![2]);
        let by_name = chat_search(&products, &categories, "dresser");
        assert_eq!(ids(&by_name), vec![1]);
    }

    #[test]
    fn test_chat_search_caps_results() {
        let categories = vec![category(1, None)];
        let products: Vec<Product> = (1..=8)
            .map(|i| product(i, 1, &format!("Crib {i}"), &format!("C-{i}"), 100))
            .collect();
        let result = chat_search(&products, &categories, "crib");
        assert_eq!(result.len(), CHAT_SEARCH_LIMIT);
        assert_eq!(ids(&result), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_chat_search_empty_query_is_empty() {
        let products = vec![product(1, 1, "Crib", "A-1", 100)];
        assert!(chat_search(&products, &[category(1, None)], "  ").is_empty());
    }

    #[test]
    fn test_sort_option_uses_screaming_snake_wire_names() {
        let json = serde_json::to_value(SortOption::DiscountDesc).unwrap();
        assert_eq!(json, "DISCOUNT_DESC");
        let parsed: SortOption = serde_json::from_str("\"PRICE_ASC\"").unwrap();
        assert_eq!(parsed, SortOption::PriceAsc);
    }
}
