//! Structural checks for category placement and slugs.
//!
//! All checks run against the in-memory node set of one domain and never
//! touch the store; services load the rows first, validate, then write.

use std::collections::HashMap;

use thiserror::Error;
use uuid::Uuid;

use crate::shared::constants::MAX_TREE_DEPTH;

use super::models::Category;
use super::tree;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NodeViolation {
    #[error("a category cannot be its own parent")]
    SelfParent,

    #[error("the requested parent is a descendant of this category")]
    CyclicParent,

    #[error("the category tree is limited to 3 levels")]
    DepthExceeded,

    #[error("level-3 categories cannot have children")]
    InvalidParentLevel,

    #[error("slug '{0}' is already in use")]
    DuplicateSlug(String),
}

/// Check both placement and slug for a candidate node.
///
/// `candidate_id` is `None` for a node that does not exist yet.
pub fn validate(
    candidate_id: Option<Uuid>,
    parent_id: Option<Uuid>,
    slug: &str,
    nodes: &[Category],
) -> Result<(), NodeViolation> {
    validate_placement(candidate_id, parent_id, nodes)?;
    validate_slug(candidate_id, slug, nodes)
}

/// Check that attaching the candidate under `parent_id` keeps the tree
/// acyclic and within the depth bound.
pub fn validate_placement(
    candidate_id: Option<Uuid>,
    parent_id: Option<Uuid>,
    nodes: &[Category],
) -> Result<(), NodeViolation> {
    let Some(parent_id) = parent_id else {
        // Root placement. Moving a subtree to the root can only decrease
        // its depth, so an already-valid subtree always fits.
        return Ok(());
    };

    if candidate_id == Some(parent_id) {
        return Err(NodeViolation::SelfParent);
    }

    // Walk up from the requested parent. Meeting the candidate means the
    // parent sits inside the candidate's own subtree.
    let by_id: HashMap<Uuid, &Category> = nodes.iter().map(|c| (c.id, c)).collect();
    let mut cursor = Some(parent_id);
    let mut hops = 0usize;
    while let Some(ancestor) = cursor {
        if candidate_id == Some(ancestor) {
            return Err(NodeViolation::CyclicParent);
        }
        hops += 1;
        if hops > nodes.len() {
            // pre-existing cycle in the stored rows
            return Err(NodeViolation::CyclicParent);
        }
        cursor = by_id.get(&ancestor).and_then(|c| c.parent_id);
    }

    let levels = tree::derive_levels(nodes);
    let parent_level = levels.get(&parent_id).copied().unwrap_or(1);
    if parent_level >= MAX_TREE_DEPTH {
        return Err(NodeViolation::InvalidParentLevel);
    }

    // A reparented node drags its subtree along; the deepest leaf must
    // still land within the bound.
    let height = candidate_id
        .map(|id| tree::subtree_height(id, nodes))
        .unwrap_or(1);
    if parent_level + height > MAX_TREE_DEPTH {
        return Err(NodeViolation::DepthExceeded);
    }

    Ok(())
}

/// Check slug uniqueness across the domain's whole tree, ignoring the
/// candidate's own current row.
pub fn validate_slug(
    candidate_id: Option<Uuid>,
    slug: &str,
    nodes: &[Category],
) -> Result<(), NodeViolation> {
    let taken = nodes
        .iter()
        .any(|c| c.slug == slug && Some(c.id) != candidate_id);
    if taken {
        Err(NodeViolation::DuplicateSlug(slug.to_string()))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::tree::fixtures::{cat, cat_named, id};
    use super::*;

    #[test]
    fn test_new_root_is_valid() {
        let nodes = vec![cat(1, None, 0)];
        assert_eq!(validate_placement(None, None, &nodes), Ok(()));
    }

    #[test]
    fn test_new_child_under_level_two_is_valid() {
        let nodes = vec![cat(1, None, 0), cat(2, Some(1), 0)];
        assert_eq!(validate_placement(None, Some(id(2)), &nodes), Ok(()));
    }

    #[test]
    fn test_self_parent_rejected() {
        let nodes = vec![cat(1, None, 0)];
        assert_eq!(
            validate_placement(Some(id(1)), Some(id(1)), &nodes),
            Err(NodeViolation::SelfParent)
        );
    }

    #[test]
    fn test_parenting_under_own_descendant_rejected() {
        let nodes = vec![cat(1, None, 0), cat(2, Some(1), 0), cat(3, Some(2), 0)];
        // direct child
        assert_eq!(
            validate_placement(Some(id(1)), Some(id(2)), &nodes),
            Err(NodeViolation::CyclicParent)
        );
        // transitive descendant
        assert_eq!(
            validate_placement(Some(id(1)), Some(id(3)), &nodes),
            Err(NodeViolation::CyclicParent)
        );
    }

    #[test]
    fn test_level_three_parent_rejected() {
        let nodes = vec![cat(1, None, 0), cat(2, Some(1), 0), cat(3, Some(2), 0)];
        assert_eq!(
            validate_placement(None, Some(id(3)), &nodes),
            Err(NodeViolation::InvalidParentLevel)
        );
    }

    #[test]
    fn test_reparent_with_subtree_overflow_rejected() {
        // 1 -> 2 (height 2 subtree at node 10..) moving under a level-2
        // parent would push node 11 to level 4
        let nodes = vec![
            cat(1, None, 0),
            cat(2, Some(1), 0),
            cat(10, None, 1),
            cat(11, Some(10), 0),
        ];
        assert_eq!(
            validate_placement(Some(id(10)), Some(id(2)), &nodes),
            Err(NodeViolation::DepthExceeded)
        );
        // under a root it still fits
        assert_eq!(validate_placement(Some(id(10)), Some(id(1)), &nodes), Ok(()));
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let nodes = vec![cat_named(1, None, 0, "Sports"), cat_named(2, None, 1, "Politics")];
        assert_eq!(
            validate_slug(None, "sports", &nodes),
            Err(NodeViolation::DuplicateSlug("sports".to_string()))
        );
        // a node keeps its own slug on edit
        assert_eq!(validate_slug(Some(id(1)), "sports", &nodes), Ok(()));
        assert_eq!(validate_slug(None, "economy", &nodes), Ok(()));
    }

    #[test]
    fn test_validate_combines_placement_and_slug() {
        let nodes = vec![cat_named(1, None, 0, "Sports")];
        assert_eq!(
            validate(None, None, "sports", &nodes),
            Err(NodeViolation::DuplicateSlug("sports".to_string()))
        );
        assert_eq!(validate(None, Some(id(1)), "football", &nodes), Ok(()));
    }
}
