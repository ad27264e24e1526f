//! Node abstractions for the consistent hash ring.
//!
//! Nodes represent the backend key-value stores that own slices of the ring.
//! They are identified by a caller-assigned `NodeId` and reached through an
//! opaque `host:port` address, which is also what gets hashed onto the ring.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Caller-assigned identifier for a node in the ring.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Backend store participating in the ring.
///
/// Keep this struct small and cheap to clone; connections and other
/// heavy state belong to the router.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    /// `host:port` of the store. Used as hashing input and as network target.
    pub address: String,
}

impl Node {
    /// Construct a new node.
    pub fn new(id: NodeId, address: impl Into<String>) -> Self {
        Self {
            id,
            address: address.into(),
        }
    }

    /// The bytes hashed to place this node on the ring.
    pub fn ring_key(&self) -> &[u8] {
        self.address.as_bytes()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node {} ({})", self.id, self.address)
    }
}

/// Parses the `ID=HOST:PORT` form used on the command line and in env vars.
impl FromStr for Node {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (id, address) = s
            .split_once('=')
            .ok_or_else(|| Error::InvalidNode(format!("expected ID=HOST:PORT, got {s:?}")))?;
        let id: u64 = id
            .trim()
            .parse()
            .map_err(|_| Error::InvalidNode(format!("node id {id:?} is not an integer")))?;
        let address = address.trim();
        if address.is_empty() {
            return Err(Error::InvalidNode(format!("node {id} has an empty address")));
        }
        Ok(Node::new(NodeId(id), address))
    }
}
