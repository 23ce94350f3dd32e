use crate::id::ObjectId;
use thiserror::Error;

/// Failures reported by a document collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Unknown object: {0}")]
    UnknownObject(ObjectId),
    #[error("Document unavailable: {0}")]
    Unavailable(String),
}
