//! Path identity.
//!
//! A node's path is the chain of object ids from just below the root
//! sentinel down to the node, joined with `/`. It depends on ancestors
//! only, never on row positions.

use crate::arena::{NodeArena, NodeKey};
use deptree_core::ObjectId;

pub(crate) const SEPARATOR: char = '/';

/// Path of `key`. The root sentinel (and unknown handles) map to `""`.
pub fn path_of(arena: &NodeArena, key: NodeKey) -> String {
    let mut ids = Vec::new();
    let mut current = Some(key);

    while let Some(node) = current.and_then(|k| arena.get(k)) {
        if node.parent().is_none() {
            break;
        }
        ids.push(node.object_id().to_string());
        current = node.parent();
    }

    ids.reverse();
    ids.join("/")
}

/// Resolves `path` below `root` using only materialized children.
///
/// Resolution stops with `None` at the first segment that is not a
/// number, is missing, or sits below a node whose children were never
/// fetched. It never asks the document for anything.
pub fn find_node_by_path(arena: &NodeArena, path: &str, root: NodeKey) -> Option<NodeKey> {
    arena.get(root)?;
    if path.is_empty() {
        return Some(root);
    }

    let mut current = root;
    for segment in path.split(SEPARATOR) {
        let id: ObjectId = segment.parse().ok()?;
        if !arena.get(current)?.children_loaded() {
            return None;
        }
        let (_, child) = arena.find_child(current, id)?;
        current = child;
    }

    Some(current)
}

/// Number of segments in a path; `0` for the root.
pub(crate) fn depth(path: &str) -> usize {
    if path.is_empty() {
        0
    } else {
        path.split(SEPARATOR).count()
    }
}
