//! Deptree Graph - Pattern document storage
//!
//! This crate holds a pattern document's objects and the "is used by"
//! relationships between them, and answers the dependency tree's
//! questions about them through [`deptree_core::DependencySource`].
//!
//! # Architecture
//!
//! The graph uses petgraph internally with an id index for lookups.
//! Edges point from an object to the objects that depend on it, so the
//! dependencies of an object are its outgoing neighbors.
//!
//! # Example
//!
//! ```
//! use deptree_core::{DependencySource, ObjectId, ObjectKind};
//! use deptree_graph::{PatternGraph, PatternObject};
//!
//! let mut graph = PatternGraph::new();
//! let a = ObjectId::new(1);
//! let piece = ObjectId::new(2);
//! graph.add_object(PatternObject::new(a, ObjectKind::Object { name: "A".into(), alias: None })).unwrap();
//! graph.add_object(PatternObject::new(piece, ObjectKind::Piece { name: "Back".into() })).unwrap();
//! graph.add_dependency(a, piece).unwrap();
//!
//! assert_eq!(graph.fetch_dependencies(a).unwrap(), vec![piece]);
//! ```

mod description;
mod error;
mod graph;

pub use description::{DependencyEdge, GraphDescription, PatternObject};
pub use error::GraphError;
pub use graph::{GraphStats, PatternGraph};
