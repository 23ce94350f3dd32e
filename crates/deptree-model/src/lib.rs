//! Deptree Model - The dependency tree index
//!
//! This crate presents a pattern document's dependency graph as a tree a
//! view can page through. Children are fetched from the document only
//! when the view first expands a node, and later document changes are
//! folded in as minimal row insertions, removals and moves so that the
//! view keeps its expansion and selection.
//!
//! # Architecture
//!
//! - [`NodeArena`] owns every materialized node; nodes refer to each
//!   other by [`NodeKey`] handles.
//! - Paths (`"7/12"`) identify nodes by their ancestor ids and survive
//!   any rebuild that keeps those ancestors.
//! - [`DependencyTreeModel`] combines the arena with a
//!   [`deptree_core::DependencySource`] and exposes the index/row/data
//!   hooks a tree view binds to. Every structural change is recorded as a
//!   [`ModelEvent`].
//! - [`TreeStateManager`] and [`RootFilter`] are view-side helpers.
//!
//! # Example
//!
//! ```
//! use deptree_core::{ObjectId, ObjectKind};
//! use deptree_graph::{PatternGraph, PatternObject};
//! use deptree_model::{DependencyTreeModel, ItemRole, ModelIndex};
//!
//! let mut graph = PatternGraph::new();
//! graph.add_object(PatternObject::new(ObjectId::new(1), ObjectKind::Piece { name: "Front".into() })).unwrap();
//!
//! let mut model = DependencyTreeModel::new(graph);
//! model.set_root_objects(&[ObjectId::new(1)]);
//!
//! let front = model.index(0, 0, &ModelIndex::invalid());
//! assert_eq!(model.data(&front, ItemRole::Display).as_text(), Some("Front"));
//! ```

mod arena;
mod config;
mod event;
mod expansion;
mod filter;
mod index;
mod loader;
mod model;
mod path;
mod reconcile;
mod state;
mod view;

#[cfg(test)]
mod testing;

pub use arena::{Node, NodeArena, NodeKey};
pub use config::{ConfigError, ModelConfig};
pub use event::ModelEvent;
pub use expansion::ExpansionState;
pub use filter::RootFilter;
pub use index::{ItemData, ItemRole, ModelIndex, Orientation};
pub use model::DependencyTreeModel;
pub use path::{find_node_by_path, path_of};
pub use reconcile::{plan_edit, EditPlan};
pub use state::TreeStateManager;
