//! Structural change notifications.

use serde::{Deserialize, Serialize};

/// A change a bound view has to replay.
///
/// Parents are named by path (`None` for the root) because indexes into
/// the old structure would be meaningless once the change is applied.
/// Row numbers refer to the structure right after the change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelEvent {
    /// Everything was rebuilt.
    ModelReset,

    /// Rows `first..=last` were added under `parent`.
    RowsInserted {
        parent: Option<String>,
        first: usize,
        last: usize,
    },

    /// Rows `first..=last` of `parent` were destroyed along with their
    /// subtrees.
    RowsRemoved {
        parent: Option<String>,
        first: usize,
        last: usize,
    },

    /// The row at `from` now sits at `to`. Its subtree is untouched.
    RowsMoved {
        parent: Option<String>,
        from: usize,
        to: usize,
    },

    /// The row at `path` changed in place (for example after its children
    /// were fetched).
    DataChanged { path: String },
}

impl std::fmt::Display for ModelEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn parent_name(parent: &Option<String>) -> &str {
            parent.as_deref().unwrap_or("<root>")
        }

        match self {
            Self::ModelReset => write!(f, "reset"),
            Self::RowsInserted { parent, first, last } => {
                write!(f, "insert {}[{}..={}]", parent_name(parent), first, last)
            }
            Self::RowsRemoved { parent, first, last } => {
                write!(f, "remove {}[{}..={}]", parent_name(parent), first, last)
            }
            Self::RowsMoved { parent, from, to } => {
                write!(f, "move {}[{} -> {}]", parent_name(parent), from, to)
            }
            Self::DataChanged { path } => write!(f, "changed {}", path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = ModelEvent::RowsInserted {
            parent: Some("7".to_string()),
            first: 0,
            last: 2,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"rows_inserted\""));
        assert!(json.contains("\"parent\":\"7\""));

        let back: ModelEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_event_display() {
        let event = ModelEvent::RowsMoved {
            parent: None,
            from: 0,
            to: 2,
        };
        assert_eq!(event.to_string(), "move <root>[0 -> 2]");
    }
}
