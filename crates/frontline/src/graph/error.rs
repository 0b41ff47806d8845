//! Errors raised while assembling or updating the node graph.

use thiserror::Error;

use super::NodeId;

/// Problems with externally supplied node data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// Two records share the same id.
    #[error("duplicate node {0}")]
    DuplicateNode(NodeId),

    /// A supply link names a node that was never declared.
    #[error("node {from} links to unknown node {to}")]
    UnknownLink { from: NodeId, to: NodeId },

    /// Coordinates must be finite in both unit systems.
    #[error("node {0} has a non-finite coordinate")]
    NonFiniteCoordinate(NodeId),

    /// Ownership update for a node that does not exist.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
}
