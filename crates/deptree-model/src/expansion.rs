//! Expansion state tracking.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The set of expanded node paths.
///
/// This is a plain value with no link to live nodes, so it survives any
/// rebuild of the tree. Paths of nodes that no longer exist are simply
/// never matched again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpansionState {
    paths: BTreeSet<String>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the path was not present yet.
    pub fn insert(&mut self, path: impl Into<String>) -> bool {
        self.paths.insert(path.into())
    }

    pub fn remove(&mut self, path: &str) -> bool {
        self.paths.remove(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Paths in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ExpansionState {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl IntoIterator for ExpansionState {
    type Item = String;
    type IntoIter = std::collections::btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_remove() {
        let mut state = ExpansionState::new();
        assert!(state.insert("7"));
        assert!(!state.insert("7"));
        assert!(state.insert("7/12"));
        assert_eq!(state.len(), 2);

        assert!(state.remove("7"));
        assert!(!state.contains("7"));
        assert!(state.contains("7/12"));
    }

    #[test]
    fn test_json_is_a_plain_list() {
        let state: ExpansionState = ["7/12", "7"].into_iter().collect();
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"["7","7/12"]"#);

        let back: ExpansionState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
