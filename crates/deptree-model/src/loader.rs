//! Lazy loading hooks.

use crate::arena::NodeKey;
use crate::event::ModelEvent;
use crate::index::ModelIndex;
use crate::model::DependencyTreeModel;
use crate::path::path_of;
use deptree_core::DependencySource;
use tracing::{debug, trace};

impl<D: DependencySource> DependencyTreeModel<D> {
    /// Whether the row at `parent` should show an expander.
    ///
    /// For a node that was never expanded this asks the document instead
    /// of fetching the children.
    pub fn has_children(&self, parent: &ModelIndex) -> bool {
        let Some(key) = self.node_for(parent) else {
            return false;
        };
        let Some(node) = self.arena.get(key) else {
            return false;
        };

        if node.children_loaded() {
            !node.children().is_empty()
        } else {
            self.document.has_dependencies(node.object_id())
        }
    }

    /// Whether expanding `parent` would fetch from the document.
    pub fn can_fetch_more(&self, parent: &ModelIndex) -> bool {
        self.node_for(parent)
            .and_then(|key| self.arena.get(key))
            .is_some_and(|node| !node.children_loaded())
    }

    /// Fetches and materializes the children of `parent`.
    ///
    /// The document is asked at most once per node; later calls do
    /// nothing. If the fetch fails the node stays unloaded and no event
    /// is recorded, so a later call tries again.
    pub fn fetch_more(&mut self, parent: &ModelIndex) {
        let Some(key) = self.node_for(parent) else {
            return;
        };
        let Some(node) = self.arena.get(key) else {
            return;
        };
        if node.children_loaded() {
            return;
        }

        let id = node.object_id();
        let deps = match self.document.fetch_dependencies(id) {
            Ok(deps) => self.visible_ids(deps),
            Err(e) => {
                debug!("Failed to load dependencies of {}: {}", id, e);
                return;
            }
        };

        for (row, &dep) in deps.iter().enumerate() {
            let name = self.document.display_name(dep);
            self.arena.insert_child(key, row, dep, name);
        }
        if let Some(node) = self.arena.get_mut(key) {
            node.children_loaded = true;
        }

        let path = path_of(&self.arena, key);
        trace!("Loaded {} children for {:?}", deps.len(), path);

        if !deps.is_empty() {
            self.push_event(ModelEvent::RowsInserted {
                parent: Some(path.clone()),
                first: 0,
                last: deps.len() - 1,
            });
        }
        self.push_event(ModelEvent::DataChanged { path });
    }

    /// Node behind `index`: the root for the invalid index, `None` for an
    /// index whose node was destroyed.
    pub(crate) fn node_for(&self, index: &ModelIndex) -> Option<NodeKey> {
        match index.node() {
            None => Some(self.arena.root()),
            Some(key) if self.arena.contains(key) => Some(key),
            Some(_) => None,
        }
    }
}
