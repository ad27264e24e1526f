//! Error types for the core library.

use crate::node::NodeId;
use thiserror::Error;

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the core library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Lookup attempted before any node was admitted.
    #[error("ring is empty: no node has been admitted")]
    EmptyRing,
    /// A node with this id is already part of the ring.
    #[error("duplicate node id: {0}")]
    DuplicateNode(NodeId),
    /// Invalid node configuration
    #[error("invalid node: {0}")]
    InvalidNode(String),
}
