//! Hash ring data structure.
//!
//! Each admitted node gets exactly one position, the hash of its address.
//! Keys are hashed with the same partitioner and resolved against the sorted
//! circle of node positions.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::node::{Node, NodeId};
use crate::partitioner::{Crc32Partitioner, Partitioner};
use crate::ring::circle::Circle;

/// Consistent hash ring mapping keys to backend nodes.
///
/// The ring only grows: nodes are admitted with [`HashRing::add_node`] and
/// never removed.
#[derive(Debug)]
pub struct HashRing<P: Partitioner = Crc32Partitioner> {
    partitioner: P,
    /// Position on the ring -> node placed there.
    nodes: HashMap<P::TokenType, Node>,
    /// Ids already admitted. Only used to reject duplicates.
    members: HashSet<NodeId>,
    circle: Circle<P::TokenType>,
}

impl HashRing<Crc32Partitioner> {
    /// Create an empty ring hashing with CRC-32.
    pub fn new() -> Self {
        Self::with_partitioner(Crc32Partitioner)
    }
}

impl Default for HashRing<Crc32Partitioner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Partitioner> HashRing<P> {
    /// Create an empty ring using a custom partitioner.
    pub fn with_partitioner(partitioner: P) -> Self {
        Self {
            partitioner,
            nodes: HashMap::new(),
            members: HashSet::new(),
            circle: Circle::new(),
        }
    }

    /// Admit a node onto the ring.
    ///
    /// Returns `false` and leaves the ring untouched if a node with the same
    /// id was already admitted. Otherwise the node is placed at the hash of its
    /// address and the circle is rebuilt.
    ///
    /// Two different addresses that hash to the same position are not
    /// detected as duplicates: the later node replaces the earlier one at that
    /// position.
    pub fn add_node(&mut self, node: Node) -> bool {
        if self.members.contains(&node.id) {
            debug!(node_id = %node.id, "node already admitted, ignoring");
            return false;
        }

        let token = self.partitioner.partition(node.ring_key());
        let id = node.id;
        if let Some(previous) = self.nodes.insert(token, node) {
            warn!(
                position = ?token,
                replaced = %previous.id,
                node_id = %id,
                "ring position collision, earlier node replaced"
            );
        }
        self.members.insert(id);
        self.circle.rebuild(self.nodes.keys().copied());

        metrics::counter!("ring_nodes_admitted_total").increment(1);
        info!(node_id = %id, position = ?token, nodes = self.members.len(), "node admitted");
        true
    }

    /// Admit a node, reporting a duplicate id as an error instead of `false`.
    pub fn try_add_node(&mut self, node: Node) -> Result<()> {
        let id = node.id;
        if self.add_node(node) {
            Ok(())
        } else {
            Err(Error::DuplicateNode(id))
        }
    }

    /// Hash an arbitrary string into ring space.
    pub fn hash(&self, input: &str) -> P::TokenType {
        self.partitioner.partition(input.as_bytes())
    }

    /// Circle index that owns `token`, or `None` on an empty ring.
    ///
    /// See [`Circle::resolve`] for the resolution rule.
    pub fn search_index(&self, token: &P::TokenType) -> Option<usize> {
        self.circle.resolve(token)
    }

    /// Find the node that owns `key`.
    ///
    /// # Panics
    ///
    /// Panics if no node has been admitted yet. Callers must populate the ring
    /// before routing; use [`HashRing::lookup`] when that cannot be guaranteed.
    pub fn locate_node(&self, key: &str) -> &Node {
        match self.lookup(key) {
            Some(node) => node,
            None => panic!("locate_node called on an empty ring"),
        }
    }

    /// Find the node that owns `key`, or `None` on an empty ring.
    pub fn lookup(&self, key: &str) -> Option<&Node> {
        let token = self.hash(key);
        let index = self.search_index(&token)?;
        let position = self.circle.get(index)?;
        self.nodes.get(&position)
    }

    /// Like [`HashRing::lookup`] but with a typed error for the empty case.
    pub fn try_locate(&self, key: &str) -> Result<&Node> {
        self.lookup(key).ok_or(Error::EmptyRing)
    }

    /// Number of admitted node ids.
    pub fn node_count(&self) -> usize {
        self.members.len()
    }

    /// Number of occupied positions. Lower than `node_count` after a collision.
    pub fn token_count(&self) -> usize {
        self.circle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.circle.is_empty()
    }

    /// Sorted circle positions.
    pub fn circle(&self) -> &[P::TokenType] {
        self.circle.as_slice()
    }

    /// Nodes in circle order.
    pub fn nodes(&self) -> Vec<&Node> {
        self.circle
            .as_slice()
            .iter()
            .filter_map(|token| self.nodes.get(token))
            .collect()
    }

    /// `(position, node id)` pairs in circle order.
    pub fn tokens(&self) -> Vec<(P::TokenType, NodeId)> {
        self.circle
            .as_slice()
            .iter()
            .filter_map(|token| self.nodes.get(token).map(|node| (*token, node.id)))
            .collect()
    }

    /// True if the id was admitted, even if its position was later taken over.
    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.members.contains(id)
    }

    /// Node currently placed on the ring under `id`.
    pub fn get_node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.values().find(|node| node.id == *id)
    }

    pub fn partitioner_name(&self) -> &'static str {
        self.partitioner.name()
    }
}

/// Builder collecting nodes before producing a [`HashRing`].
#[derive(Debug)]
pub struct RingBuilder<P: Partitioner = Crc32Partitioner> {
    partitioner: P,
    nodes: Vec<Node>,
}

impl RingBuilder<Crc32Partitioner> {
    pub fn new() -> Self {
        Self::with_partitioner(Crc32Partitioner)
    }
}

impl Default for RingBuilder<Crc32Partitioner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Partitioner> RingBuilder<P> {
    pub fn with_partitioner(partitioner: P) -> Self {
        Self {
            partitioner,
            nodes: Vec::new(),
        }
    }

    pub fn add_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn add_nodes(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.nodes.extend(nodes);
        self
    }

    /// Admit the collected nodes in insertion order. Duplicate ids are dropped.
    pub fn build(self) -> HashRing<P> {
        let mut ring = HashRing::with_partitioner(self.partitioner);
        for node in self.nodes {
            let id = node.id;
            if !ring.add_node(node) {
                warn!(node_id = %id, "duplicate node id in ring configuration, skipped");
            }
        }
        ring
    }
}
