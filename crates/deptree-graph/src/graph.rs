//! Core graph data structure.
//!
//! The PatternGraph wraps petgraph and adds an id index for fast lookups.
//! A stable graph is used so that removing an object never renumbers
//! the indexes of the others.

use crate::description::{DependencyEdge, GraphDescription, PatternObject};
use crate::error::GraphError;
use deptree_core::{DependencySource, DocumentError, ObjectId};
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fs;
use std::path::Path;
use tracing::debug;

/// A pattern document: objects plus "is used by" edges.
#[derive(Debug, Clone)]
pub struct PatternGraph {
    /// The underlying petgraph graph.
    graph: StableDiGraph<PatternObject, ()>,

    /// Maps object IDs to graph node indexes.
    id_index: HashMap<ObjectId, NodeIndex>,

    /// Explicitly configured top-level objects.
    roots: Vec<ObjectId>,
}

impl Default for PatternGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternGraph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self {
            graph: StableDiGraph::new(),
            id_index: HashMap::new(),
            roots: Vec::new(),
        }
    }

    /// Builds a graph from its serializable description.
    pub fn from_description(description: GraphDescription) -> Result<Self, GraphError> {
        let mut graph = Self::new();

        for object in description.objects {
            graph.add_object(object)?;
        }
        for DependencyEdge { object, dependent } in description.edges {
            graph.add_dependency(object, dependent)?;
        }
        graph.set_roots(description.roots);

        debug!(
            "Built pattern graph with {} objects and {} dependencies",
            graph.object_count(),
            graph.dependency_count()
        );

        Ok(graph)
    }

    /// Parses a JSON graph description.
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        let description: GraphDescription = serde_json::from_str(json)?;
        Self::from_description(description)
    }

    /// Loads a JSON graph description from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, GraphError> {
        let json = fs::read_to_string(path.as_ref())?;
        debug!("Loading pattern graph from {}", path.as_ref().display());
        Self::from_json(&json)
    }

    /// Adds an object to the graph.
    pub fn add_object(&mut self, object: PatternObject) -> Result<(), GraphError> {
        if object.id.is_root() {
            return Err(GraphError::ReservedId);
        }
        if self.id_index.contains_key(&object.id) {
            return Err(GraphError::DuplicateObject(object.id));
        }

        let id = object.id;
        let index = self.graph.add_node(object);
        self.id_index.insert(id, index);

        Ok(())
    }

    /// Records that `dependent` is built from `object`.
    ///
    /// Adding the same dependency twice keeps a single edge.
    pub fn add_dependency(&mut self, object: ObjectId, dependent: ObjectId) -> Result<(), GraphError> {
        let from = self.index_of(object)?;
        let to = self.index_of(dependent)?;
        self.graph.update_edge(from, to, ());
        Ok(())
    }

    /// Removes an object and every edge touching it.
    pub fn remove_object(&mut self, id: ObjectId) -> Option<PatternObject> {
        let index = self.id_index.remove(&id)?;
        self.roots.retain(|&root| root != id);
        self.graph.remove_node(index)
    }

    /// Gets an object by its ID.
    pub fn get(&self, id: ObjectId) -> Option<&PatternObject> {
        let index = self.id_index.get(&id)?;
        self.graph.node_weight(*index)
    }

    /// Sets the top-level objects. Unknown ids are kept and simply
    /// filtered out by [`PatternGraph::roots`].
    pub fn set_roots(&mut self, roots: Vec<ObjectId>) {
        self.roots = roots;
    }

    /// Objects shown at the top level of the dependency tree.
    ///
    /// Returns the configured roots that exist, or, when none were
    /// configured, every non-modeling object without prerequisites in
    /// insertion order.
    pub fn roots(&self) -> Vec<ObjectId> {
        if !self.roots.is_empty() {
            return self
                .roots
                .iter()
                .copied()
                .filter(|id| self.id_index.contains_key(id))
                .collect();
        }

        self.graph
            .node_indices()
            .filter(|&index| {
                self.graph
                    .neighbors_directed(index, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .filter_map(|index| self.graph.node_weight(index))
            .filter(|object| !object.kind.is_modeling())
            .map(|object| object.id)
            .collect()
    }

    /// Direct dependents of an object, in the order they were added.
    pub fn dependents(&self, id: ObjectId) -> Option<Vec<ObjectId>> {
        let index = self.id_index.get(&id)?;
        Some(
            self.direct_dependents(*index)
                .into_iter()
                .map(|dep| self.graph[dep].id)
                .collect(),
        )
    }

    /// Returns the number of objects.
    pub fn object_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of dependencies.
    pub fn dependency_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Iterates over all objects.
    pub fn objects(&self) -> impl Iterator<Item = &PatternObject> {
        self.graph.node_weights()
    }

    fn index_of(&self, id: ObjectId) -> Result<NodeIndex, GraphError> {
        self.id_index
            .get(&id)
            .copied()
            .ok_or(GraphError::UnknownEndpoint(id))
    }

    fn direct_dependents(&self, index: NodeIndex) -> Vec<NodeIndex> {
        // petgraph walks edges newest first
        let mut dependents: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(index, Direction::Outgoing)
            .collect();
        dependents.reverse();
        dependents
    }

    /// Pieces reachable downstream of a modeling vertex, breadth first.
    fn dependent_pieces(&self, start: NodeIndex) -> Vec<ObjectId> {
        let mut pieces = Vec::new();
        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            for next in self.direct_dependents(current) {
                if !visited.insert(next) {
                    continue;
                }
                if self.graph[next].kind.is_piece() {
                    pieces.push(self.graph[next].id);
                }
                queue.push_back(next);
            }
        }

        pieces
    }
}

impl DependencySource for PatternGraph {
    /// Direct dependents of `id`, with modeling vertices replaced by the
    /// pieces that use them.
    fn fetch_dependencies(&self, id: ObjectId) -> Result<Vec<ObjectId>, DocumentError> {
        let index = self
            .id_index
            .get(&id)
            .copied()
            .ok_or(DocumentError::UnknownObject(id))?;

        let mut visible = Vec::new();
        for dep in self.direct_dependents(index) {
            let object = &self.graph[dep];
            if object.kind.is_modeling() {
                for piece in self.dependent_pieces(dep) {
                    if !visible.contains(&piece) {
                        visible.push(piece);
                    }
                }
            } else {
                visible.push(object.id);
            }
        }

        Ok(visible)
    }

    /// Agrees with [`Self::fetch_dependencies`]: a modeling dependent only
    /// counts when some piece sits below it.
    fn has_dependencies(&self, id: ObjectId) -> bool {
        self.id_index.get(&id).is_some_and(|&index| {
            self.graph
                .neighbors_directed(index, Direction::Outgoing)
                .any(|dep| {
                    !self.graph[dep].kind.is_modeling() || !self.dependent_pieces(dep).is_empty()
                })
        })
    }

    fn contains(&self, id: ObjectId) -> bool {
        self.id_index.contains_key(&id)
    }

    fn display_name(&self, id: ObjectId) -> String {
        self.get(id)
            .and_then(|object| object.kind.display_name())
            .unwrap_or_else(|| id.default_name())
    }

    fn tooltip(&self, id: ObjectId) -> String {
        self.get(id)
            .map(|object| object.kind.tooltip())
            .unwrap_or_default()
    }
}

/// Graph statistics for the CLI.
#[derive(Debug, Serialize, Deserialize)]
pub struct GraphStats {
    pub object_count: usize,
    pub dependency_count: usize,
    pub pieces: usize,
    pub roots: usize,
}

impl PatternGraph {
    /// Returns graph statistics.
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            object_count: self.object_count(),
            dependency_count: self.dependency_count(),
            pieces: self.objects().filter(|o| o.kind.is_piece()).count(),
            roots: self.roots().len(),
        }
    }
}
