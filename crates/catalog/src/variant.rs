//! Multi-dimensional variant switching.
//!
//! A variant family is a group of products differing by one or two labeled
//! dimensions (color, size, ...), cross-linked by ID through each member's
//! `variants` list. Switching a dimension picks the family member whose
//! value tuple matches the requested change.

use nursery_core::Product;
use tracing::debug;

/// Resolve the product to display after changing one variant dimension.
///
/// Builds the target tuple from the current product's own values with
/// `values[dimension] = value`, then:
///
/// 1. looks for an exact full-tuple match among the stored variants;
/// 2. failing that, falls back to the first variant matching `value` at
///    `dimension` alone (an arbitrary combination for the remaining
///    dimensions - kept deliberately, so a sparse family still switches);
/// 3. resolves the winner's `product_id` against `all_products`.
///
/// Returns `None` when nothing matches or the matched ID is dangling; the
/// caller treats that as a no-op.
#[must_use]
pub fn switch_variant<'a>(
    product: &Product,
    dimension: usize,
    value: &str,
    all_products: &'a [Product],
) -> Option<&'a Product> {
    if product.variants.is_empty() {
        return None;
    }

    let mut target = product.variant_values.clone();
    if target.len() <= dimension {
        target.resize(dimension + 1, String::new());
    }
    target[dimension] = value.to_string();

    let matched = product
        .variants
        .iter()
        .find(|v| v.values == target)
        .or_else(|| {
            product
                .variants
                .iter()
                .find(|v| v.values.get(dimension).map(String::as_str) == Some(value))
        })?;

    let resolved = all_products.iter().find(|p| p.id == matched.product_id);
    if resolved.is_none() {
        debug!(product_id = %matched.product_id, "variant points at a missing product");
    }
    resolved
}

/// The distinct values offered for one dimension, in first-seen order with
/// empty strings dropped. This is the row of option buttons on the product
/// page.
#[must_use]
pub fn dimension_values(product: &Product, dimension: usize) -> Vec<&str> {
    let mut values = Vec::new();
    for variant in &product.variants {
        if let Some(value) = variant.values.get(dimension) {
            if !value.is_empty() && !values.contains(&value.as_str()) {
                values.push(value.as_str());
            }
        }
    }
    values
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use nursery_core::{CategoryId, ProductId, ProductVariant};
    use rust_decimal::Decimal;

    fn member(id: i64, values: &[&str], family: &[(i64, &[&str])]) -> Product {
        Product {
            id: ProductId::new(id),
            category_id: CategoryId::new(1),
            name: format!("product-{id}"),
            price: Decimal::from(1000),
            special_price: None,
            image: String::new(),
            images: Vec::new(),
            sku: format!("SKU-{id}"),
            stock: 1,
            status: true,
            description: None,
            attributes: Vec::new(),
            variant_labels: vec!["Color".to_string(), "Size".to_string()],
            variant_values: values.iter().map(ToString::to_string).collect(),
            variants: family
                .iter()
                .map(|(pid, vals)| ProductVariant {
                    product_id: ProductId::new(*pid),
                    values: vals.iter().map(ToString::to_string).collect(),
                })
                .collect(),
            sticker_ids: Vec::new(),
            is_bundle: false,
            bundle_items: Vec::new(),
        }
    }

    const FAMILY: &[(i64, &[&str])] = &[
        (1, &["White", "120x60"]),
        (2, &["White", "140x70"]),
        (3, &["Ivory", "120x60"]),
    ];

    fn family_products() -> Vec<Product> {
        FAMILY
            .iter()
            .map(|(id, values)| member(*id, values, FAMILY))
            .collect()
    }

    #[test]
    fn test_exact_tuple_match_wins() {
        let products = family_products();
        let current = &products[0]; // White / 120x60
        let next = switch_variant(current, 1, "140x70", &products).unwrap();
        assert_eq!(next.id, ProductId::new(2));
    }

    #[test]
    fn test_partial_match_falls_back_on_single_dimension() {
        let products = family_products();
        let current = &products[1]; // White / 140x70
        // No Ivory/140x70 exists; the first variant with Ivory in dimension
        // 0 is picked regardless of its size.
        let next = switch_variant(current, 0, "Ivory", &products).unwrap();
        assert_eq!(next.id, ProductId::new(3));
    }

    #[test]
    fn test_no_match_is_a_noop() {
        let products = family_products();
        assert!(switch_variant(&products[0], 0, "Walnut", &products).is_none());
    }

    #[test]
    fn test_dangling_family_member_is_a_noop() {
        let products = family_products();
        // Keep only the current product; its family still references 2 and 3.
        let only_first = vec![products[0].clone()];
        assert!(switch_variant(&only_first[0], 1, "140x70", &only_first).is_none());
    }

    #[test]
    fn test_product_without_variants_never_switches() {
        let mut lone = member(9, &["White", "120x60"], &[]);
        lone.variants.clear();
        assert!(switch_variant(&lone, 0, "White", &[lone.clone()]).is_none());
    }

    #[test]
    fn test_dimension_values_dedup_in_order() {
        let products = family_products();
        assert_eq!(dimension_values(&products[0], 0), vec!["White", "Ivory"]);
        assert_eq!(dimension_values(&products[0], 1), vec!["120x60", "140x70"]);
        assert!(dimension_values(&products[0], 5).is_empty());
    }
}
