use deptree_core::ObjectId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid graph description: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Object {0} is defined more than once")]
    DuplicateObject(ObjectId),
    #[error("Dependency refers to unknown object {0}")]
    UnknownEndpoint(ObjectId),
    #[error("Object id 0 is reserved for the tree root")]
    ReservedId,
}
