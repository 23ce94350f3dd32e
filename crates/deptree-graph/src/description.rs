//! Serializable description of a pattern document.

use deptree_core::{ObjectId, ObjectKind};
use serde::{Deserialize, Serialize};

/// A single object of the pattern document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternObject {
    pub id: ObjectId,

    #[serde(flatten)]
    pub kind: ObjectKind,
}

impl PatternObject {
    pub fn new(id: ObjectId, kind: ObjectKind) -> Self {
        Self { id, kind }
    }
}

/// `dependent` is built from (and therefore depends on) `object`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub object: ObjectId,
    pub dependent: ObjectId,
}

/// On-disk form of a [`crate::PatternGraph`].
///
/// ```json
/// {
///   "objects": [
///     { "id": 1, "type": "tool", "tool": "base_point", "name": "A" },
///     { "id": 2, "type": "piece", "name": "Front" }
///   ],
///   "edges": [ { "object": 1, "dependent": 2 } ],
///   "roots": [1]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphDescription {
    pub objects: Vec<PatternObject>,

    #[serde(default)]
    pub edges: Vec<DependencyEdge>,

    /// Objects listed at the top level of the tree. When empty, the
    /// objects without prerequisites are used; see
    /// [`crate::PatternGraph::roots`].
    #[serde(default)]
    pub roots: Vec<ObjectId>,
}
