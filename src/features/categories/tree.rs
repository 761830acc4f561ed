//! Flat parent-pointer rows to nested forest.
//!
//! The builder is arena-based: rows are indexed by position, child lists
//! hold indices, and nodes are assembled by moving rows out of their slots.
//! No object cycles, no shared ownership. It is deterministic and
//! side-effect free, so every hierarchical read can rebuild from scratch.

use std::collections::HashMap;

use uuid::Uuid;

use super::models::Category;

/// A category with its nested children, sorted by `(display_order, id)`.
#[derive(Debug)]
pub struct TreeNode {
    pub category: Category,
    pub children: Vec<TreeNode>,
}

/// Build a forest from an unordered flat row set.
///
/// Every input row appears in the output exactly once. Rows whose
/// `parent_id` does not resolve to a known id become roots rather than
/// errors, so an administrator can still see and correct them. Root and
/// child lists are sorted by `display_order` ascending, ties broken by
/// `id` for determinism.
pub fn build_forest(rows: Vec<Category>) -> Vec<TreeNode> {
    let index: HashMap<Uuid, usize> = rows.iter().enumerate().map(|(i, c)| (c.id, i)).collect();

    let mut child_lists: Vec<Vec<usize>> = vec![Vec::new(); rows.len()];
    let mut roots: Vec<usize> = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        match row.parent_id.and_then(|p| index.get(&p).copied()) {
            Some(p) if p != i => child_lists[p].push(i),
            // Dangling parent reference (or self-reference): surface as root.
            _ => roots.push(i),
        }
    }

    roots.sort_by_key(|&i| (rows[i].display_order, rows[i].id));
    for list in &mut child_lists {
        list.sort_by_key(|&i| (rows[i].display_order, rows[i].id));
    }

    let mut slots: Vec<Option<Category>> = rows.into_iter().map(Some).collect();
    let mut forest = Vec::with_capacity(roots.len());
    for &r in &roots {
        if let Some(node) = take_node(r, &child_lists, &mut slots) {
            forest.push(node);
        }
    }

    // Rows caught in a pre-existing parent cycle are unreachable from any
    // root; emit them at the top level so the output stays total.
    for i in 0..slots.len() {
        if slots[i].is_some() {
            if let Some(node) = take_node(i, &child_lists, &mut slots) {
                forest.push(node);
            }
        }
    }

    forest
}

fn take_node(
    i: usize,
    child_lists: &[Vec<usize>],
    slots: &mut [Option<Category>],
) -> Option<TreeNode> {
    let category = slots[i].take()?;
    let mut children = Vec::new();
    for &c in &child_lists[i] {
        if let Some(child) = take_node(c, child_lists, slots) {
            children.push(child);
        }
    }
    Some(TreeNode { category, children })
}

/// Derive the level of every row from its parent chain: roots are 1,
/// children are parent + 1. Dangling references and cycles terminate the
/// walk, so a row with an unresolvable parent counts as a root.
pub fn derive_levels(rows: &[Category]) -> HashMap<Uuid, i32> {
    let parents: HashMap<Uuid, Option<Uuid>> =
        rows.iter().map(|c| (c.id, c.parent_id)).collect();

    let mut levels = HashMap::with_capacity(rows.len());
    for row in rows {
        let mut level = 1;
        let mut seen = vec![row.id];
        let mut cursor = row.parent_id;
        while let Some(pid) = cursor {
            if seen.contains(&pid) || !parents.contains_key(&pid) {
                break;
            }
            level += 1;
            seen.push(pid);
            cursor = parents[&pid];
        }
        levels.insert(row.id, level);
    }
    levels
}

/// Height of the subtree rooted at `root` (a bare node has height 1).
/// Used to check whether a reparented subtree still fits under the depth
/// bound.
pub fn subtree_height(root: Uuid, rows: &[Category]) -> i32 {
    let mut children: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for c in rows {
        if let Some(p) = c.parent_id {
            children.entry(p).or_default().push(c.id);
        }
    }
    height(root, &children, rows.len())
}

fn height(id: Uuid, children: &HashMap<Uuid, Vec<Uuid>>, guard: usize) -> i32 {
    if guard == 0 {
        return 1;
    }
    1 + children
        .get(&id)
        .map(|cs| {
            cs.iter()
                .map(|&c| height(c, children, guard - 1))
                .max()
                .unwrap_or(0)
        })
        .unwrap_or(0)
}

#[cfg(test)]
pub(super) mod fixtures {
    use chrono::Utc;
    use uuid::Uuid;

    use crate::features::categories::models::{Category, ContentDomain};

    pub fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    pub fn cat(n: u128, parent: Option<u128>, order: i32) -> Category {
        cat_named(n, parent, order, &format!("Category {}", n))
    }

    pub fn cat_named(n: u128, parent: Option<u128>, order: i32, name: &str) -> Category {
        let now = Utc::now();
        Category {
            id: id(n),
            domain: ContentDomain::News,
            parent_id: parent.map(id),
            name: name.to_string(),
            slug: crate::shared::validation::slugify(name),
            description: None,
            icon: None,
            color: None,
            level: 1,
            display_order: order,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{cat, id};
    use super::*;

    fn count_nodes(forest: &[TreeNode]) -> usize {
        forest
            .iter()
            .map(|n| 1 + count_nodes(&n.children))
            .sum()
    }

    #[test]
    fn test_builds_nested_forest() {
        let rows = vec![cat(1, None, 0), cat(2, Some(1), 0), cat(3, Some(2), 0)];
        let forest = build_forest(rows);

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].category.id, id(1));
        assert_eq!(forest[0].children.len(), 1);
        assert_eq!(forest[0].children[0].category.id, id(2));
        assert_eq!(forest[0].children[0].children[0].category.id, id(3));
    }

    #[test]
    fn test_dangling_parent_becomes_root() {
        // 99 does not exist; the orphan must stay visible, not error out
        let rows = vec![cat(1, None, 0), cat(2, Some(99), 0)];
        let forest = build_forest(rows);

        assert_eq!(forest.len(), 2);
        assert_eq!(count_nodes(&forest), 2);
    }

    #[test]
    fn test_every_row_appears_exactly_once() {
        let rows = vec![
            cat(1, None, 1),
            cat(2, Some(1), 0),
            cat(3, Some(1), 1),
            cat(4, None, 0),
            cat(5, Some(99), 0), // dangling
        ];
        let forest = build_forest(rows);
        assert_eq!(count_nodes(&forest), 5);
    }

    #[test]
    fn test_cycle_rows_still_emitted() {
        // A two-node parent cycle cannot be nested under any root; the
        // builder must still return both rows.
        let rows = vec![cat(1, Some(2), 0), cat(2, Some(1), 0), cat(3, None, 0)];
        let forest = build_forest(rows);
        assert_eq!(count_nodes(&forest), 3);
    }

    #[test]
    fn test_siblings_sorted_by_order_then_id() {
        let rows = vec![
            cat(3, Some(10), 1),
            cat(2, Some(10), 0),
            cat(10, None, 0),
            cat(5, Some(10), 1), // same order as 3, higher id
        ];
        let forest = build_forest(rows);

        let children: Vec<Uuid> = forest[0]
            .children
            .iter()
            .map(|c| c.category.id)
            .collect();
        assert_eq!(children, vec![id(2), id(3), id(5)]);
    }

    #[test]
    fn test_deterministic_across_input_orderings() {
        let rows = vec![cat(1, None, 1), cat(2, None, 0), cat(3, Some(2), 0)];
        let mut reversed = rows.clone();
        reversed.reverse();

        let a: Vec<Uuid> = build_forest(rows).iter().map(|n| n.category.id).collect();
        let b: Vec<Uuid> = build_forest(reversed)
            .iter()
            .map(|n| n.category.id)
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_reorder_scenario_roots_swap_children_stay() {
        // A(order 1 after reorder), B(order 0), C nested under A at order 0
        let rows = vec![cat(1, None, 1), cat(2, None, 0), cat(3, Some(1), 0)];
        let forest = build_forest(rows);

        assert_eq!(forest[0].category.id, id(2)); // B first
        assert_eq!(forest[1].category.id, id(1)); // A second
        assert_eq!(forest[1].children[0].category.id, id(3)); // C still under A
        assert_eq!(forest[1].children[0].category.display_order, 0);
    }

    #[test]
    fn test_derive_levels() {
        let rows = vec![
            cat(1, None, 0),
            cat(2, Some(1), 0),
            cat(3, Some(2), 0),
            cat(4, Some(99), 0), // dangling counts as root
        ];
        let levels = derive_levels(&rows);

        assert_eq!(levels[&id(1)], 1);
        assert_eq!(levels[&id(2)], 2);
        assert_eq!(levels[&id(3)], 3);
        assert_eq!(levels[&id(4)], 1);
    }

    #[test]
    fn test_subtree_height() {
        let rows = vec![cat(1, None, 0), cat(2, Some(1), 0), cat(3, Some(2), 0)];
        assert_eq!(subtree_height(id(1), &rows), 3);
        assert_eq!(subtree_height(id(2), &rows), 2);
        assert_eq!(subtree_height(id(3), &rows), 1);
    }
}
