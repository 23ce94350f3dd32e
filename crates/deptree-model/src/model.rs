//! The dependency tree model.
//!
//! This is the part that keeps the tree in step with the document. Every
//! mutation here takes `&mut self`, runs to completion, and records the
//! row-level events a view needs to follow along without resetting.

use crate::arena::{NodeArena, NodeKey};
use crate::config::ModelConfig;
use crate::event::ModelEvent;
use crate::expansion::ExpansionState;
use crate::path::{find_node_by_path, path_of};
use crate::reconcile::{plan_edit, runs};
use deptree_core::{DependencySource, ObjectId};
use std::collections::HashSet;
use tracing::{debug, trace};

/// A lazily materialized tree over a document's dependency graph.
///
/// The hidden root's children are the root objects given by the caller;
/// every other level is fetched from the document the first time a view
/// expands it.
pub struct DependencyTreeModel<D> {
    pub(crate) arena: NodeArena,
    pub(crate) document: D,
    pub(crate) config: ModelConfig,
    expanded: ExpansionState,
    events: Vec<ModelEvent>,
}

impl<D: DependencySource> DependencyTreeModel<D> {
    /// Creates an empty model reading from `document`.
    pub fn new(document: D) -> Self {
        Self::with_config(document, ModelConfig::default())
    }

    pub fn with_config(document: D, config: ModelConfig) -> Self {
        Self {
            arena: NodeArena::new(),
            document,
            config,
            expanded: ExpansionState::new(),
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    /// Replaces the document and returns the previous one.
    ///
    /// The tree itself is left alone; call [`Self::update_tree`] or
    /// [`Self::refresh_node`] to pick up the new document's contents.
    pub fn set_document(&mut self, document: D) -> D {
        std::mem::replace(&mut self.document, document)
    }

    /// Read access to the materialized nodes.
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// Events recorded since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<ModelEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[ModelEvent] {
        &self.events
    }

    pub(crate) fn push_event(&mut self, event: ModelEvent) {
        trace!("{}", event);
        self.events.push(event);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Root objects
    // ─────────────────────────────────────────────────────────────────────

    /// Replaces the whole tree with unloaded nodes for `ids`.
    pub fn set_root_objects(&mut self, ids: &[ObjectId]) {
        let root = self.arena.root();
        let destroyed = self.arena.clear_children(root);

        let ids = self.visible_ids(ids.to_vec());
        for (row, &id) in ids.iter().enumerate() {
            let name = self.document.display_name(id);
            self.arena.insert_child(root, row, id, name);
        }

        debug!(
            "Reset tree: {} root objects, {} nodes destroyed",
            ids.len(),
            destroyed
        );
        self.push_event(ModelEvent::ModelReset);
    }

    /// Destroys every node and forgets the expansion state.
    pub fn clear_model(&mut self) {
        let root = self.arena.root();
        self.arena.clear_children(root);
        self.expanded.clear();
        debug!("Cleared tree");
        self.push_event(ModelEvent::ModelReset);
    }

    /// Appends a root object unless it is already present.
    pub fn add_root_object(&mut self, id: ObjectId) {
        let root = self.arena.root();
        if self.arena.find_child(root, id).is_some() || self.visible_ids(vec![id]).is_empty() {
            return;
        }

        let row = self.arena.children(root).len();
        self.insert_rows(root, row, &[id]);
    }

    /// Removes a root object and its whole materialized subtree.
    pub fn remove_root_object(&mut self, id: ObjectId) {
        let root = self.arena.root();
        if let Some((row, _)) = self.arena.find_child(root, id) {
            self.remove_rows(root, row, 1);
        }
    }

    /// Moves the existing root nodes into `new_order`.
    ///
    /// Nothing is created, destroyed or fetched. Ids that are not roots
    /// are skipped; roots missing from `new_order` end up after the
    /// ordered ones, in their previous relative order.
    pub fn reorder_root_objects(&mut self, new_order: &[ObjectId]) {
        let root = self.arena.root();
        self.reorder_children(root, new_order);
    }

    /// Brings the root objects in line with `new_roots`.
    ///
    /// Roots that disappeared are removed, surviving roots are moved into
    /// the new order (keeping their subtrees), and new roots are inserted
    /// where they belong. With [`ModelConfig::refresh_loaded_on_update`]
    /// every loaded subtree is then refreshed from the document.
    pub fn update_tree(&mut self, new_roots: &[ObjectId]) {
        let root = self.arena.root();
        let new_roots = self.visible_ids(new_roots.to_vec());
        let new_set: HashSet<ObjectId> = new_roots.iter().copied().collect();

        let old_roots = self.arena.child_ids(root);
        let old_set: HashSet<ObjectId> = old_roots.iter().copied().collect();

        let stale: Vec<usize> = old_roots
            .iter()
            .enumerate()
            .filter(|(_, id)| !new_set.contains(id))
            .map(|(row, _)| row)
            .collect();
        self.remove_positions(root, &stale);

        let surviving: Vec<ObjectId> = new_roots
            .iter()
            .copied()
            .filter(|id| old_set.contains(id))
            .collect();
        self.reorder_children(root, &surviving);

        let added: Vec<usize> = new_roots
            .iter()
            .enumerate()
            .filter(|(_, id)| !old_set.contains(id))
            .map(|(row, _)| row)
            .collect();
        self.insert_positions(root, &new_roots, &added);

        debug!(
            "Updated roots: {} removed, {} added, {} kept",
            stale.len(),
            added.len(),
            surviving.len()
        );

        if self.config.refresh_loaded_on_update {
            let loaded: Vec<NodeKey> = self
                .arena
                .children(root)
                .iter()
                .copied()
                .filter(|&key| self.is_loaded(key))
                .collect();
            for key in loaded {
                self.refresh_subtree(key);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Refresh
    // ─────────────────────────────────────────────────────────────────────

    /// Re-fetches the children of the node at `path` and reconciles them.
    ///
    /// Does nothing if the path no longer resolves or the node was never
    /// expanded. If the document fails, the node is left as it was. The
    /// empty path names no node; root objects only change through the
    /// root operations.
    pub fn refresh_node(&mut self, path: &str) {
        let root = self.arena.root();
        match find_node_by_path(&self.arena, path, root) {
            Some(key) if key != root && self.is_loaded(key) => {
                self.refresh(key);
            }
            _ => trace!("Refresh skipped for {:?}", path),
        }
    }

    /// Refreshes `key` and then every loaded node below it.
    fn refresh_subtree(&mut self, key: NodeKey) {
        if !self.refresh(key) {
            return;
        }
        let loaded: Vec<NodeKey> = self
            .arena
            .children(key)
            .iter()
            .copied()
            .filter(|&child| self.is_loaded(child))
            .collect();
        for child in loaded {
            self.refresh_subtree(child);
        }
    }

    fn refresh(&mut self, key: NodeKey) -> bool {
        let Some(id) = self.arena.object_id(key).filter(|id| !id.is_root()) else {
            return false;
        };
        match self.document.fetch_dependencies(id) {
            Ok(deps) => {
                let deps = self.visible_ids(deps);
                self.reconcile_children(key, &deps);
                true
            }
            Err(e) => {
                debug!("Keeping children of {}: {}", id, e);
                false
            }
        }
    }

    /// Applies the minimal edit turning the children of `key` into `new`.
    ///
    /// Kept children keep their nodes. The node stays loaded, even when
    /// `new` is empty.
    pub(crate) fn reconcile_children(&mut self, key: NodeKey, new: &[ObjectId]) {
        let old = self.arena.child_ids(key);
        let plan = plan_edit(&old, new);

        if plan.is_noop() {
            return;
        }

        trace!(
            "Reconciling {:?}: {} removed, {} inserted",
            path_of(&self.arena, key),
            plan.removed.len(),
            plan.inserted.len()
        );

        self.remove_positions(key, &plan.removed);
        self.insert_positions(key, new, &plan.inserted);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Expansion state
    // ─────────────────────────────────────────────────────────────────────

    pub fn set_expanded_nodes(&mut self, paths: ExpansionState) {
        self.expanded = paths;
    }

    pub fn expanded_nodes(&self) -> &ExpansionState {
        &self.expanded
    }

    // ─────────────────────────────────────────────────────────────────────
    // Row primitives
    // ─────────────────────────────────────────────────────────────────────

    /// Removes the children of `parent` at the given (pre-removal,
    /// ascending) positions, one left-to-right sweep.
    fn remove_positions(&mut self, parent: NodeKey, positions: &[usize]) {
        let mut removed = 0;
        for (start, len) in runs(positions) {
            self.remove_rows(parent, start - removed, len);
            removed += len;
        }
    }

    /// Inserts `ids[pos]` for every (ascending) position at row `pos`.
    fn insert_positions(&mut self, parent: NodeKey, ids: &[ObjectId], positions: &[usize]) {
        for (start, len) in runs(positions) {
            self.insert_rows(parent, start, &ids[start..start + len]);
        }
    }

    fn remove_rows(&mut self, parent: NodeKey, first: usize, count: usize) {
        if count == 0 {
            return;
        }
        let mut destroyed = 0;
        for _ in 0..count {
            destroyed += self.arena.remove_child_at(parent, first).unwrap_or(0);
        }
        trace!("Removed {} rows ({} nodes) at {}", count, destroyed, first);

        self.push_event(ModelEvent::RowsRemoved {
            parent: self.parent_path(parent),
            first,
            last: first + count - 1,
        });
    }

    fn insert_rows(&mut self, parent: NodeKey, first: usize, ids: &[ObjectId]) {
        if ids.is_empty() {
            return;
        }
        for (offset, &id) in ids.iter().enumerate() {
            let name = self.document.display_name(id);
            self.arena.insert_child(parent, first + offset, id, name);
        }

        self.push_event(ModelEvent::RowsInserted {
            parent: self.parent_path(parent),
            first,
            last: first + ids.len() - 1,
        });
    }

    fn reorder_children(&mut self, parent: NodeKey, order: &[ObjectId]) {
        let mut target = 0;

        for &id in order {
            let Some((current, _)) = self.arena.find_child(parent, id) else {
                continue;
            };
            if current < target {
                // Listed twice; already placed
                continue;
            }
            if current != target {
                self.arena.move_child(parent, current, target);
                self.push_event(ModelEvent::RowsMoved {
                    parent: self.parent_path(parent),
                    from: current,
                    to: target,
                });
            }
            target += 1;
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────

    /// Drops the reserved root id, ids the document does not know, and
    /// repeated ids (keeping the first occurrence).
    pub(crate) fn visible_ids(&self, ids: Vec<ObjectId>) -> Vec<ObjectId> {
        let mut seen = HashSet::new();
        ids.into_iter()
            .filter(|&id| {
                if id.is_root() || !self.document.contains(id) {
                    debug!("Skipping invalid object id {}", id);
                    return false;
                }
                if !seen.insert(id) {
                    debug!("Skipping repeated object id {}", id);
                    return false;
                }
                true
            })
            .collect()
    }

    pub(crate) fn is_loaded(&self, key: NodeKey) -> bool {
        self.arena
            .get(key)
            .is_some_and(|node| node.children_loaded())
    }

    /// `None` for the root, the node's path otherwise.
    pub(crate) fn parent_path(&self, parent: NodeKey) -> Option<String> {
        if parent == self.arena.root() {
            None
        } else {
            Some(path_of(&self.arena, parent))
        }
    }
}
