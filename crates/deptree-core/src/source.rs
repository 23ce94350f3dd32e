//! The document collaborator interface.

use crate::error::DocumentError;
use crate::id::ObjectId;
use std::rc::Rc;
use std::sync::Arc;

/// What the dependency tree needs to know about a pattern document.
///
/// Implementations are queried synchronously from the thread that owns
/// the tree, and are expected to answer cheaply.
pub trait DependencySource {
    /// Ordered ids of the objects that depend on `id`.
    fn fetch_dependencies(&self, id: ObjectId) -> Result<Vec<ObjectId>, DocumentError>;

    /// Cheap check whether `id` has at least one dependency.
    ///
    /// The default falls back to a full fetch.
    fn has_dependencies(&self, id: ObjectId) -> bool {
        self.fetch_dependencies(id)
            .map(|deps| !deps.is_empty())
            .unwrap_or(false)
    }

    /// Whether `id` names an object the document knows about.
    fn contains(&self, _id: ObjectId) -> bool {
        true
    }

    /// Text shown for `id` in the tree.
    fn display_name(&self, id: ObjectId) -> String;

    /// Tooltip text for `id`; empty when there is nothing to say.
    fn tooltip(&self, id: ObjectId) -> String;
}

macro_rules! forward_dependency_source {
    ($($ptr:ty),*) => {
        $(
            impl<T: DependencySource + ?Sized> DependencySource for $ptr {
                fn fetch_dependencies(&self, id: ObjectId) -> Result<Vec<ObjectId>, DocumentError> {
                    (**self).fetch_dependencies(id)
                }

                fn has_dependencies(&self, id: ObjectId) -> bool {
                    (**self).has_dependencies(id)
                }

                fn contains(&self, id: ObjectId) -> bool {
                    (**self).contains(id)
                }

                fn display_name(&self, id: ObjectId) -> String {
                    (**self).display_name(id)
                }

                fn tooltip(&self, id: ObjectId) -> String {
                    (**self).tooltip(id)
                }
            }
        )*
    };
}

forward_dependency_source!(&T, Box<T>, Rc<T>, Arc<T>);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Table(HashMap<u32, Vec<u32>>);

    impl DependencySource for Table {
        fn fetch_dependencies(&self, id: ObjectId) -> Result<Vec<ObjectId>, DocumentError> {
            self.0
                .get(&id.get())
                .map(|deps| deps.iter().copied().map(ObjectId::new).collect())
                .ok_or(DocumentError::UnknownObject(id))
        }

        fn display_name(&self, id: ObjectId) -> String {
            id.default_name()
        }

        fn tooltip(&self, _id: ObjectId) -> String {
            String::new()
        }
    }

    #[test]
    fn test_default_has_dependencies() {
        let table = Table(HashMap::from([(1, vec![2, 3]), (2, vec![])]));

        assert!(table.has_dependencies(ObjectId::new(1)));
        assert!(!table.has_dependencies(ObjectId::new(2)));
        // Failures count as "no dependencies"
        assert!(!table.has_dependencies(ObjectId::new(9)));
    }

    #[test]
    fn test_forwarding_through_pointers() {
        let table = Rc::new(Table(HashMap::from([(1, vec![2])])));
        let boxed: Box<dyn DependencySource> = Box::new(table.clone());

        assert_eq!(
            boxed.fetch_dependencies(ObjectId::new(1)).unwrap(),
            vec![ObjectId::new(2)]
        );
        assert_eq!((&*table).display_name(ObjectId::new(5)), "Object_5");
        assert!(boxed.contains(ObjectId::new(77)));
    }
}
