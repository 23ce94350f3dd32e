//! Item-view hooks: indexes, rows and data.

use crate::arena::NodeKey;
use crate::index::{ItemData, ItemRole, ModelIndex, Orientation};
use crate::model::DependencyTreeModel;
use crate::path::{find_node_by_path, path_of};
use deptree_core::{DependencySource, ObjectId};

const COLUMN_COUNT: usize = 1;

impl<D: DependencySource> DependencyTreeModel<D> {
    /// Index of the child at `row` under `parent`, or the invalid index
    /// when there is no such child.
    pub fn index(&self, row: usize, column: usize, parent: &ModelIndex) -> ModelIndex {
        if column >= COLUMN_COUNT {
            return ModelIndex::invalid();
        }
        self.node_for(parent)
            .and_then(|key| self.arena.children(key).get(row).copied())
            .map(|child| ModelIndex::new(row, column, child))
            .unwrap_or_default()
    }

    /// Index of the parent of `child`; invalid for top-level rows.
    pub fn parent(&self, child: &ModelIndex) -> ModelIndex {
        let Some(key) = child.node().filter(|&k| self.arena.contains(k)) else {
            return ModelIndex::invalid();
        };
        match self.arena.parent(key) {
            Some(parent) if parent != self.arena.root() => self.index_for_node(parent),
            _ => ModelIndex::invalid(),
        }
    }

    /// Number of materialized children under `parent`.
    pub fn row_count(&self, parent: &ModelIndex) -> usize {
        self.node_for(parent)
            .map(|key| self.arena.children(key).len())
            .unwrap_or(0)
    }

    pub fn column_count(&self, _parent: &ModelIndex) -> usize {
        COLUMN_COUNT
    }

    pub fn data(&self, index: &ModelIndex, role: ItemRole) -> ItemData {
        let Some(node) = index.node().and_then(|key| self.arena.get(key)) else {
            return ItemData::None;
        };

        match role {
            ItemRole::Display => ItemData::Text(node.display_name().to_string()),
            ItemRole::ToolTip => {
                let tooltip = node
                    .tooltip
                    .get_or_init(|| self.document.tooltip(node.object_id()));
                ItemData::Text(tooltip.clone())
            }
            ItemRole::User => ItemData::Object(node.object_id()),
        }
    }

    pub fn header_data(&self, section: usize, orientation: Orientation, role: ItemRole) -> ItemData {
        if section == 0 && orientation == Orientation::Horizontal && role == ItemRole::Display {
            ItemData::Text(self.config.header.clone())
        } else {
            ItemData::None
        }
    }

    /// Index of a live node; invalid for the root or a destroyed handle.
    pub fn index_for_node(&self, key: NodeKey) -> ModelIndex {
        if key == self.arena.root() {
            return ModelIndex::invalid();
        }
        self.arena
            .row_of(key)
            .map(|row| ModelIndex::new(row, 0, key))
            .unwrap_or_default()
    }

    /// The object behind `index`, if it still exists.
    pub fn object_id(&self, index: &ModelIndex) -> Option<ObjectId> {
        self.arena.object_id(index.node()?)
    }

    /// Path of the node behind `index`; `None` for the root or a stale
    /// index.
    pub fn path(&self, index: &ModelIndex) -> Option<String> {
        let key = index.node().filter(|&k| self.arena.contains(k))?;
        Some(path_of(&self.arena, key))
    }

    /// Index of the node at `path`, or invalid if it is not materialized.
    pub fn find_index_by_path(&self, path: &str) -> ModelIndex {
        find_node_by_path(&self.arena, path, self.arena.root())
            .map(|key| self.index_for_node(key))
            .unwrap_or_default()
    }

    /// Index of the top-level row for `id`, or invalid.
    pub fn find_root_index_by_object_id(&self, id: ObjectId) -> ModelIndex {
        let root = self.arena.root();
        self.arena
            .find_child(root, id)
            .map(|(row, key)| ModelIndex::new(row, 0, key))
            .unwrap_or_default()
    }
}
