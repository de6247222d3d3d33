//! Errors returned by graph operations.
//!
//! Membership questions (`contains`, `is_edge`) answer `false` for unknown vertices.
//! Every operation that has to resolve a vertex to its slot fails with
//! [`GraphError::VertexNotFound`] instead.

use thiserror::Error;

/// Result type of fallible graph operations
pub type Result<T> = std::result::Result<T, GraphError>;

/// Error during a graph operation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    /// An operation referenced a vertex that is not registered in the graph.
    #[error("vertex not found in graph")]
    VertexNotFound,
    /// An edge was requested between a vertex and itself.
    #[error("self-loops are not supported")]
    SelfLoop,
    /// No further slot can be allocated.
    #[error("slot space exhausted: at most {0} slots can be allocated")]
    SlotSpaceExhausted(usize),
}
