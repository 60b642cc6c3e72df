//! Category tree resolution.
//!
//! Categories form a forest via `parent_id`. Stored data is not trusted to
//! be acyclic: a malformed parent chain must not hang the catalog, so every
//! traversal here carries a visited set.

use std::collections::HashSet;

use nursery_core::{Category, CategoryId};

/// All categories reachable from `root` via child links, including `root`
/// itself.
///
/// Used for "include subcategories" filtering. The result is a set, so a
/// category reached through two paths (malformed data) appears once, and a
/// cycle terminates instead of recursing forever.
#[must_use]
pub fn descendant_ids(categories: &[Category], root: CategoryId) -> HashSet<CategoryId> {
    let mut seen = HashSet::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        for child in categories.iter().filter(|c| c.parent_id == Some(id)) {
            stack.push(child.id);
        }
    }
    seen
}

/// Whether re-parenting `category` under `new_parent` would create a cycle.
///
/// Walks the parent chain upward from `new_parent`; hitting `category`
/// means the assignment must be rejected. A pre-existing loop higher up the
/// chain is also reported as a cycle rather than walked forever.
#[must_use]
pub fn would_create_cycle(
    categories: &[Category],
    category: CategoryId,
    new_parent: Option<CategoryId>,
) -> bool {
    let Some(mut current) = new_parent else {
        return false;
    };
    let mut seen = HashSet::new();
    loop {
        if current == category {
            return true;
        }
        if !seen.insert(current) {
            return true;
        }
        match categories
            .iter()
            .find(|c| c.id == current)
            .and_then(|c| c.parent_id)
        {
            Some(parent) => current = parent,
            None => return false,
        }
    }
}

/// Enabled child categories of `parent` (roots when `None`), ordered by
/// `sort_order`. This is the tile list the catalog screen shows.
#[must_use]
pub fn visible_children(categories: &[Category], parent: Option<CategoryId>) -> Vec<&Category> {
    let mut children: Vec<&Category> = categories
        .iter()
        .filter(|c| c.parent_id == parent && c.is_enabled())
        .collect();
    children.sort_by_key(|c| c.sort_key());
    children
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

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

    #[test]
    fn test_descendants_include_root_and_are_closed_under_children() {
        // 1 -> {2, 3}, 2 -> {4}
        let cats = vec![
            category(1, None),
            category(2, Some(1)),
            category(3, Some(1)),
            category(4, Some(2)),
            category(5, None),
        ];
        let ids = descendant_ids(&cats, CategoryId::new(1));
        let expected: HashSet<CategoryId> =
            [1, 2, 3, 4].into_iter().map(CategoryId::new).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_leaf_descendants_is_singleton() {
        let cats = vec![category(1, None), category(2, Some(1))];
        let ids = descendant_ids(&cats, CategoryId::new(2));
        assert_eq!(ids.len(), 1);
        assert!(ids.contains(&CategoryId::new(2)));
    }

    #[test]
    fn test_descendants_terminate_on_cycle() {
        // Malformed data: 1 -> 2 -> 1
        let cats = vec![category(1, Some(2)), category(2, Some(1))];
        let ids = descendant_ids(&cats, CategoryId::new(1));
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn test_would_create_cycle_direct_and_transitive() {
        let cats = vec![
            category(1, None),
            category(2, Some(1)),
            category(3, Some(2)),
        ];
        // 1 under 3 closes the loop 3 -> 2 -> 1
        assert!(would_create_cycle(&cats, CategoryId::new(1), Some(CategoryId::new(3))));
        // Self-parenting
        assert!(would_create_cycle(&cats, CategoryId::new(2), Some(CategoryId::new(2))));
        // Moving 3 to the root is fine
        assert!(!would_create_cycle(&cats, CategoryId::new(3), None));
        // A sibling subtree is fine
        assert!(!would_create_cycle(&cats, CategoryId::new(3), Some(CategoryId::new(1))));
    }

    #[test]
    fn test_visible_children_skip_disabled_and_sort() {
        let mut a = category(2, Some(1));
        a.sort_order = Some(2);
        let mut b = category(3, Some(1));
        b.sort_order = Some(1);
        let mut hidden = category(4, Some(1));
        hidden.status = Some(false);
        let cats = vec![category(1, None), a, b, hidden];

        let children = visible_children(&cats, Some(CategoryId::new(1)));
        let ids: Vec<i64> = children.iter().map(|c| c.id.as_i64()).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn test_visible_children_root_level() {
        let cats = vec![category(1, None), category(2, Some(1)), category(5, None)];
        let roots = visible_children(&cats, None);
        assert_eq!(roots.len(), 2);
    }
}
