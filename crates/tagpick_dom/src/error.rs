//! Document error types

use thiserror::Error;

use crate::tree::NodeId;

/// Structural errors raised when mutating the document tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    /// The node does not exist (never created, or already removed)
    #[error("Unknown node: {0:?}")]
    UnknownNode(NodeId),

    /// The reference node has no parent, so nothing can be inserted next to it
    #[error("Reference node {0:?} is detached")]
    Detached(NodeId),

    /// Inserting the node would make it an ancestor of itself
    #[error("Node {node:?} cannot be inserted under its own descendant {parent:?}")]
    Cycle {
        /// Node being moved
        node: NodeId,
        /// Intended new parent
        parent: NodeId,
    },
}

/// Result type for document operations
pub type Result<T> = std::result::Result<T, DomError>;
