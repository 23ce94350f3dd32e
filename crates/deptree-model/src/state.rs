//! Remembering which rows a view had open.

use crate::expansion::ExpansionState;
use crate::index::ModelIndex;
use crate::model::DependencyTreeModel;
use crate::path::depth;
use deptree_core::DependencySource;
use tracing::debug;

/// Tracks the expanded rows of one view by path.
///
/// Feed it the view's expand/collapse notifications, or take a snapshot
/// with [`TreeStateManager::save_state`] before a rebuild, then call
/// [`TreeStateManager::restore_state`] afterwards.
#[derive(Debug, Clone, Default)]
pub struct TreeStateManager {
    expanded_paths: ExpansionState,
}

impl TreeStateManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_expanded<D: DependencySource>(&mut self, model: &DependencyTreeModel<D>, index: &ModelIndex) {
        if let Some(path) = model.path(index).filter(|p| !p.is_empty()) {
            self.expanded_paths.insert(path);
        }
    }

    pub fn on_collapsed<D: DependencySource>(&mut self, model: &DependencyTreeModel<D>, index: &ModelIndex) {
        if let Some(path) = model.path(index) {
            self.expanded_paths.remove(&path);
        }
    }

    /// Replaces the saved set with every row `is_expanded` reports as open,
    /// descending only through open rows.
    pub fn save_state<D, F>(&mut self, model: &DependencyTreeModel<D>, is_expanded: F)
    where
        D: DependencySource,
        F: Fn(&ModelIndex) -> bool,
    {
        self.expanded_paths.clear();

        let mut pending = vec![ModelIndex::invalid()];
        while let Some(parent) = pending.pop() {
            for row in 0..model.row_count(&parent) {
                let index = model.index(row, 0, &parent);
                if !is_expanded(&index) {
                    continue;
                }
                if let Some(path) = model.path(&index) {
                    self.expanded_paths.insert(path);
                    pending.push(index);
                }
            }
        }
    }

    /// Re-opens the saved rows that still exist, parents before children.
    ///
    /// Each resolved row gets its children fetched before `expand` is
    /// called for it, so nested paths resolve on the way down. Returns the
    /// number of rows expanded.
    pub fn restore_state<D, F>(&self, model: &mut DependencyTreeModel<D>, mut expand: F) -> usize
    where
        D: DependencySource,
        F: FnMut(&ModelIndex),
    {
        let mut paths: Vec<&str> = self.expanded_paths.iter().collect();
        paths.sort_by_key(|path| depth(path));

        let mut restored = 0;
        for path in paths {
            let index = model.find_index_by_path(path);
            if !index.is_valid() {
                debug!("Expanded path {:?} no longer exists", path);
                continue;
            }
            if model.can_fetch_more(&index) {
                model.fetch_more(&index);
            }
            expand(&index);
            restored += 1;
        }

        restored
    }

    pub fn expanded_paths(&self) -> &ExpansionState {
        &self.expanded_paths
    }

    /// Publishes the saved set as the model's expansion state.
    pub fn sync_to_model<D: DependencySource>(&self, model: &mut DependencyTreeModel<D>) {
        model.set_expanded_nodes(self.expanded_paths.clone());
    }

    pub fn sync_from_model<D: DependencySource>(&mut self, model: &DependencyTreeModel<D>) {
        self.expanded_paths = model.expanded_nodes().clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ids, FakeDocument};
    use deptree_core::ObjectId;
    use std::collections::HashSet;
    use std::rc::Rc;

    fn document() -> Rc<FakeDocument> {
        let doc = Rc::new(FakeDocument::new());
        doc.set_dependencies(7, &[12, 13]);
        doc.set_dependencies(12, &[20]);
        doc
    }

    #[test]
    fn test_save_and_restore_across_rebuild() {
        let doc = document();
        let mut model = DependencyTreeModel::new(doc.clone());
        model.set_root_objects(&ids(&[7, 8]));

        let mut manager = TreeStateManager::new();
        let seven = model.find_index_by_path("7");
        model.fetch_more(&seven);
        manager.on_expanded(&model, &seven);
        let twelve = model.find_index_by_path("7/12");
        model.fetch_more(&twelve);
        manager.on_expanded(&model, &twelve);

        model.set_root_objects(&ids(&[9, 7, 8]));
        assert!(!model.find_index_by_path("7/12").is_valid());

        let mut expanded = Vec::new();
        let restored = manager.restore_state(&mut model, |index| {
            expanded.push(index.node());
        });

        assert_eq!(restored, 2);
        assert_eq!(expanded.len(), 2);
        assert!(model.find_index_by_path("7/12/20").is_valid());
        assert_eq!(model.find_index_by_path("7").row(), 1);
    }

    #[test]
    fn test_restore_skips_missing_paths() {
        let doc = document();
        let mut model = DependencyTreeModel::new(doc);
        model.set_root_objects(&ids(&[8]));

        let mut manager = TreeStateManager::new();
        manager.expanded_paths = ["7", "7/12"].into_iter().collect();

        assert_eq!(manager.restore_state(&mut model, |_| {}), 0);
    }

    #[test]
    fn test_save_state_follows_open_rows() {
        let doc = document();
        let mut model = DependencyTreeModel::new(doc);
        model.set_root_objects(&ids(&[7, 8]));
        let seven = model.find_index_by_path("7");
        model.fetch_more(&seven);
        let twelve = model.find_index_by_path("7/12");
        model.fetch_more(&twelve);

        // 12 reports open but its parent does not
        let open: HashSet<ObjectId> = ids(&[12, 8]).into_iter().collect();
        let mut manager = TreeStateManager::new();
        manager.save_state(&model, |index| {
            model.object_id(index).is_some_and(|id| open.contains(&id))
        });

        let saved: Vec<&str> = manager.expanded_paths().iter().collect();
        assert_eq!(saved, vec!["8"]);
    }

    #[test]
    fn test_collapse_and_sync() {
        let doc = document();
        let mut model = DependencyTreeModel::new(doc);
        model.set_root_objects(&ids(&[7]));
        let seven = model.find_index_by_path("7");

        let mut manager = TreeStateManager::new();
        manager.on_expanded(&model, &seven);
        manager.sync_to_model(&mut model);
        assert!(model.expanded_nodes().contains("7"));

        manager.on_collapsed(&model, &seven);
        assert!(manager.expanded_paths().is_empty());

        manager.sync_from_model(&model);
        assert!(manager.expanded_paths().contains("7"));
    }
}
