//! In-memory document used by the model tests.

use deptree_core::{DependencySource, DocumentError, ObjectId};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

pub(crate) fn ids(raw: &[u32]) -> Vec<ObjectId> {
    raw.iter().copied().map(ObjectId::new).collect()
}

/// A document whose contents can be changed between model calls.
///
/// Every id is known unless [`FakeDocument::forget`] was called for it.
/// Ids without configured dependencies have none.
#[derive(Default)]
pub(crate) struct FakeDocument {
    dependencies: RefCell<HashMap<u32, Vec<u32>>>,
    names: RefCell<HashMap<u32, String>>,
    unknown: RefCell<HashSet<u32>>,
    failing: RefCell<HashSet<u32>>,
    fetches: RefCell<HashMap<u32, usize>>,
    tooltips: RefCell<HashMap<u32, usize>>,
}

impl FakeDocument {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_dependencies(&self, id: u32, deps: &[u32]) {
        self.dependencies.borrow_mut().insert(id, deps.to_vec());
    }

    pub(crate) fn set_name(&self, id: u32, name: &str) {
        self.names.borrow_mut().insert(id, name.to_string());
    }

    pub(crate) fn forget(&self, id: u32) {
        self.unknown.borrow_mut().insert(id);
    }

    /// Makes every later fetch for `id` fail.
    pub(crate) fn fail(&self, id: u32) {
        self.failing.borrow_mut().insert(id);
    }

    pub(crate) fn fetch_count(&self, id: u32) -> usize {
        self.fetches.borrow().get(&id).copied().unwrap_or(0)
    }

    pub(crate) fn tooltip_count(&self, id: u32) -> usize {
        self.tooltips.borrow().get(&id).copied().unwrap_or(0)
    }
}

impl DependencySource for FakeDocument {
    fn fetch_dependencies(&self, id: ObjectId) -> Result<Vec<ObjectId>, DocumentError> {
        *self.fetches.borrow_mut().entry(id.get()).or_default() += 1;

        if self.failing.borrow().contains(&id.get()) {
            return Err(DocumentError::Unavailable(format!("object {} is locked", id)));
        }
        if !self.contains(id) {
            return Err(DocumentError::UnknownObject(id));
        }

        Ok(self
            .dependencies
            .borrow()
            .get(&id.get())
            .map(|deps| ids(deps))
            .unwrap_or_default())
    }

    fn has_dependencies(&self, id: ObjectId) -> bool {
        self.dependencies
            .borrow()
            .get(&id.get())
            .is_some_and(|deps| !deps.is_empty())
    }

    fn contains(&self, id: ObjectId) -> bool {
        !self.unknown.borrow().contains(&id.get())
    }

    fn display_name(&self, id: ObjectId) -> String {
        self.names
            .borrow()
            .get(&id.get())
            .cloned()
            .unwrap_or_else(|| id.default_name())
    }

    fn tooltip(&self, id: ObjectId) -> String {
        *self.tooltips.borrow_mut().entry(id.get()).or_default() += 1;
        format!("Tooltip for {}", id)
    }
}
