//! Model indexes, roles and item data.

use crate::arena::NodeKey;
use deptree_core::ObjectId;

/// Position of a row in the tree, as handed to a view.
///
/// The invalid index stands for the (hidden) root. An index stays valid
/// only as long as the node it points to is materialized; indexes into
/// destroyed nodes behave like missing rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModelIndex {
    row: usize,
    column: usize,
    node: Option<NodeKey>,
}

impl ModelIndex {
    pub(crate) fn new(row: usize, column: usize, node: NodeKey) -> Self {
        Self {
            row,
            column,
            node: Some(node),
        }
    }

    /// The index of the root.
    pub fn invalid() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.node.is_some()
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// The node this index points to; `None` for the root.
    pub fn node(&self) -> Option<NodeKey> {
        self.node
    }
}

/// Which piece of an item a view asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemRole {
    /// The text shown for the row.
    Display,
    /// Hover text.
    ToolTip,
    /// The object id behind the row.
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Value returned for a role.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ItemData {
    #[default]
    None,
    Text(String),
    Object(ObjectId),
}

impl ItemData {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_object_id(&self) -> Option<ObjectId> {
        match self {
            Self::Object(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}
