//! Deptree Core - Shared vocabulary for the dependency tree
//!
//! This crate defines what every other Deptree crate talks about:
//! object identifiers, the kinds of objects a pattern document holds,
//! and the narrow interface through which the tree index asks a
//! document about dependencies, names and tooltips.
//!
//! # Example
//!
//! ```
//! use deptree_core::{DependencySource, DocumentError, ObjectId};
//!
//! struct Flat;
//!
//! impl DependencySource for Flat {
//!     fn fetch_dependencies(&self, _id: ObjectId) -> Result<Vec<ObjectId>, DocumentError> {
//!         Ok(Vec::new())
//!     }
//!
//!     fn display_name(&self, id: ObjectId) -> String {
//!         id.default_name()
//!     }
//!
//!     fn tooltip(&self, _id: ObjectId) -> String {
//!         String::new()
//!     }
//! }
//!
//! assert!(!Flat.has_dependencies(ObjectId::new(1)));
//! ```

mod error;
mod id;
mod kind;
mod source;

pub use error::DocumentError;
pub use id::ObjectId;
pub use kind::{format_object_name, ObjectKind, ToolKind};
pub use source::DependencySource;
