//! Node storage.
//!
//! Every materialized node lives in a single slot map. A node's children
//! are an ordered list of handles and its parent is a single handle, so
//! the tree can be walked in both directions without shared ownership.
//! Removing a node removes its whole materialized subtree.

use deptree_core::ObjectId;
use slotmap::{new_key_type, SlotMap};
use std::cell::OnceCell;

new_key_type! {
    /// Handle to a materialized node.
    ///
    /// Handles are versioned: a handle to a destroyed node never resolves
    /// again, even after its slot is reused.
    pub struct NodeKey;
}

/// One occurrence of a document object in the tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) object_id: ObjectId,
    pub(crate) display_name: String,
    pub(crate) tooltip: OnceCell<String>,
    pub(crate) children: Vec<NodeKey>,
    pub(crate) children_loaded: bool,
    pub(crate) parent: Option<NodeKey>,
}

impl Node {
    fn new(object_id: ObjectId, display_name: String, parent: Option<NodeKey>) -> Self {
        Self {
            object_id,
            display_name,
            tooltip: OnceCell::new(),
            children: Vec::new(),
            children_loaded: false,
            parent,
        }
    }

    pub fn object_id(&self) -> ObjectId {
        self.object_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The tooltip, if it has been resolved already.
    pub fn cached_tooltip(&self) -> Option<&str> {
        self.tooltip.get().map(String::as_str)
    }

    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    /// Whether the children were fetched from the document. A loaded node
    /// may still have no children.
    pub fn children_loaded(&self) -> bool {
        self.children_loaded
    }

    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }
}

/// Owner of all materialized nodes, including the root sentinel.
#[derive(Debug, Clone)]
pub struct NodeArena {
    nodes: SlotMap<NodeKey, Node>,
    root: NodeKey,
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeArena {
    /// Creates an arena holding only the root sentinel.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let mut sentinel = Node::new(ObjectId::ROOT, String::new(), None);
        sentinel.children_loaded = true;
        let root = nodes.insert(sentinel);

        Self { nodes, root }
    }

    /// The root sentinel. It is never shown as a row.
    pub fn root(&self) -> NodeKey {
        self.root
    }

    pub fn get(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Number of materialized nodes, not counting the root sentinel.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Children of `key`; empty for unknown handles.
    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        self.nodes
            .get(key)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.nodes.get(key)?.parent
    }

    pub fn object_id(&self, key: NodeKey) -> Option<ObjectId> {
        self.nodes.get(key).map(|node| node.object_id)
    }

    /// Object ids of the children of `key`, in row order.
    pub fn child_ids(&self, key: NodeKey) -> Vec<ObjectId> {
        self.children(key)
            .iter()
            .filter_map(|&child| self.object_id(child))
            .collect()
    }

    /// Locates the first child of `parent` carrying `id`.
    pub fn find_child(&self, parent: NodeKey, id: ObjectId) -> Option<(usize, NodeKey)> {
        self.children(parent)
            .iter()
            .enumerate()
            .find(|(_, &child)| self.object_id(child) == Some(id))
            .map(|(row, &child)| (row, child))
    }

    /// Position of `key` among its siblings.
    pub fn row_of(&self, key: NodeKey) -> Option<usize> {
        let parent = self.parent(key)?;
        self.children(parent).iter().position(|&child| child == key)
    }

    /// Creates an unloaded child of `parent` at `row` (clamped to the end).
    pub(crate) fn insert_child(
        &mut self,
        parent: NodeKey,
        row: usize,
        object_id: ObjectId,
        display_name: String,
    ) -> Option<NodeKey> {
        if !self.nodes.contains_key(parent) {
            return None;
        }

        let key = self
            .nodes
            .insert(Node::new(object_id, display_name, Some(parent)));
        let children = &mut self.nodes[parent].children;
        let row = row.min(children.len());
        children.insert(row, key);

        Some(key)
    }

    /// Detaches the child at `row` and destroys its subtree.
    ///
    /// Returns the number of destroyed nodes.
    pub(crate) fn remove_child_at(&mut self, parent: NodeKey, row: usize) -> Option<usize> {
        let children = &mut self.nodes.get_mut(parent)?.children;
        if row >= children.len() {
            return None;
        }
        let key = children.remove(row);
        Some(self.destroy_subtree(key))
    }

    /// Destroys every child of `parent`, leaving its loaded flag alone.
    pub(crate) fn clear_children(&mut self, parent: NodeKey) -> usize {
        let children = match self.nodes.get_mut(parent) {
            Some(node) => std::mem::take(&mut node.children),
            None => return 0,
        };
        children
            .into_iter()
            .map(|child| self.destroy_subtree(child))
            .sum()
    }

    /// Moves the child at `from` so that it ends up at row `to`.
    pub(crate) fn move_child(&mut self, parent: NodeKey, from: usize, to: usize) -> bool {
        let Some(node) = self.nodes.get_mut(parent) else {
            return false;
        };
        if from >= node.children.len() || to >= node.children.len() {
            return false;
        }
        let key = node.children.remove(from);
        node.children.insert(to, key);
        true
    }

    fn destroy_subtree(&mut self, key: NodeKey) -> usize {
        let mut destroyed = 0;
        let mut stack = vec![key];

        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                destroyed += 1;
                stack.extend(node.children);
            }
        }

        destroyed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> ObjectId {
        ObjectId::new(n)
    }

    fn add(arena: &mut NodeArena, parent: NodeKey, n: u32) -> NodeKey {
        let row = arena.children(parent).len();
        arena
            .insert_child(parent, row, id(n), format!("Object_{}", n))
            .unwrap()
    }

    #[test]
    fn test_new_arena_has_loaded_root() {
        let arena = NodeArena::new();
        let root = arena.get(arena.root()).unwrap();

        assert!(root.children_loaded());
        assert!(root.object_id().is_root());
        assert!(arena.is_empty());
    }

    #[test]
    fn test_insert_links_parent_and_child() {
        let mut arena = NodeArena::new();
        let root = arena.root();
        let a = add(&mut arena, root, 1);
        let b = add(&mut arena, a, 2);

        assert_eq!(arena.parent(b), Some(a));
        assert_eq!(arena.parent(a), Some(root));
        assert_eq!(arena.children(a), &[b]);
        assert!(!arena.get(b).unwrap().children_loaded());
        assert_eq!(arena.row_of(a), Some(0));
    }

    #[test]
    fn test_remove_cascades() {
        let mut arena = NodeArena::new();
        let root = arena.root();
        let a = add(&mut arena, root, 1);
        let b = add(&mut arena, a, 2);
        let c = add(&mut arena, b, 3);
        let d = add(&mut arena, root, 4);

        assert_eq!(arena.remove_child_at(root, 0), Some(3));
        assert!(!arena.contains(a));
        assert!(!arena.contains(b));
        assert!(!arena.contains(c));
        assert!(arena.contains(d));
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.remove_child_at(root, 5), None);
    }

    #[test]
    fn test_stale_handles_do_not_resolve() {
        let mut arena = NodeArena::new();
        let root = arena.root();
        let a = add(&mut arena, root, 1);
        arena.clear_children(root);
        let b = add(&mut arena, root, 1);

        assert_ne!(a, b);
        assert!(arena.get(a).is_none());
        assert!(arena.children(a).is_empty());
    }

    #[test]
    fn test_move_child() {
        let mut arena = NodeArena::new();
        let root = arena.root();
        for n in 1..=4 {
            add(&mut arena, root, n);
        }

        assert!(arena.move_child(root, 0, 2));
        assert_eq!(arena.child_ids(root), vec![id(2), id(3), id(1), id(4)]);
        assert!(arena.move_child(root, 3, 0));
        assert_eq!(arena.child_ids(root), vec![id(4), id(2), id(3), id(1)]);
        assert!(!arena.move_child(root, 4, 0));
    }

    #[test]
    fn test_find_child() {
        let mut arena = NodeArena::new();
        let root = arena.root();
        add(&mut arena, root, 5);
        let b = add(&mut arena, root, 7);

        assert_eq!(arena.find_child(root, id(7)), Some((1, b)));
        assert_eq!(arena.find_child(root, id(8)), None);
    }
}
