//! Top-level text filter.

use crate::index::{ItemRole, ModelIndex};
use crate::model::DependencyTreeModel;
use deptree_core::DependencySource;

/// Hides top-level rows whose display name does not contain a pattern.
///
/// Matching is case-insensitive. Rows below the top level are always
/// accepted, so an accepted root shows its whole subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootFilter {
    pattern: String,
}

impl RootFilter {
    pub fn new(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_lowercase(),
        }
    }

    pub fn set_pattern(&mut self, pattern: &str) {
        self.pattern = pattern.to_lowercase();
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn filter_accepts_row<D: DependencySource>(
        &self,
        model: &DependencyTreeModel<D>,
        source_row: usize,
        source_parent: &ModelIndex,
    ) -> bool {
        if source_parent.is_valid() {
            return true;
        }
        if self.pattern.is_empty() {
            return true;
        }

        let index = model.index(source_row, 0, source_parent);
        model
            .data(&index, ItemRole::Display)
            .as_text()
            .is_some_and(|name| name.to_lowercase().contains(&self.pattern))
    }

    /// Source rows of the accepted top-level rows, in order.
    pub fn visible_rows<D: DependencySource>(&self, model: &DependencyTreeModel<D>) -> Vec<usize> {
        let root = ModelIndex::invalid();
        (0..model.row_count(&root))
            .filter(|&row| self.filter_accepts_row(model, row, &root))
            .collect()
    }

    /// Source row of the `row`-th accepted top-level row.
    pub fn map_to_source<D: DependencySource>(
        &self,
        model: &DependencyTreeModel<D>,
        row: usize,
    ) -> Option<usize> {
        self.visible_rows(model).get(row).copied()
    }

    /// Filtered row of a top-level source row, if it is accepted.
    pub fn map_from_source<D: DependencySource>(
        &self,
        model: &DependencyTreeModel<D>,
        source_row: usize,
    ) -> Option<usize> {
        self.visible_rows(model)
            .iter()
            .position(|&row| row == source_row)
    }
}
