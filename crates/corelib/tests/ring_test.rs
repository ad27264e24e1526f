//! Tests for the hash ring implementation.
//!
//! # Test Strategy
//!
//! 1. **Basic functionality**: Empty ring, add/lookup, duplicate admission
//! 2. **Multiple nodes**: Consistency across repeated lookups
//! 3. **Edge cases**: Wraparound resolution, single node, position collisions
//! 4. **Properties**: Hash and lookup determinism over arbitrary input

use corelib::node::{Node, NodeId};
use corelib::partitioner::Partitioner;
use corelib::ring::{HashRing, RingBuilder};
use corelib::partitioner::Crc32Partitioner;
use corelib::token::HashToken;
use corelib::Error;
use proptest::prelude::*;

/// Places keys at the position spelled by their decimal text, so tests can
/// pin nodes and probes to exact ring positions.
struct NumericPartitioner;

impl Partitioner for NumericPartitioner {
    type TokenType = HashToken;

    fn partition(&self, key: &[u8]) -> HashToken {
        let text = std::str::from_utf8(key).expect("utf-8 key");
        HashToken(text.parse().expect("numeric key"))
    }

    fn name(&self) -> &'static str {
        "NumericPartitioner"
    }
}

fn numeric_ring(positions: &[u32]) -> HashRing<NumericPartitioner> {
    let mut ring = HashRing::with_partitioner(NumericPartitioner);
    for (i, position) in positions.iter().enumerate() {
        assert!(ring.add_node(Node::new(NodeId(i as u64), position.to_string())));
    }
    ring
}

fn three_nodes() -> HashRing {
    RingBuilder::new()
        .add_node(Node::new(NodeId(0), "localhost:3000"))
        .add_node(Node::new(NodeId(1), "localhost:3001"))
        .add_node(Node::new(NodeId(2), "localhost:3002"))
        .build()
}

// ============================================================================
// Basic Functionality Tests
// ============================================================================

#[test]
fn test_empty_ring_lookup() {
    let ring = HashRing::new();
    assert!(ring.is_empty());
    assert_eq!(ring.lookup("key1"), None);
    assert_eq!(ring.try_locate("key1"), Err(Error::EmptyRing));
    assert_eq!(ring.node_count(), 0);
    assert_eq!(ring.token_count(), 0);
}

#[test]
#[should_panic(expected = "empty ring")]
fn test_locate_on_empty_ring_panics() {
    let ring = HashRing::new();
    ring.locate_node("key1");
}

#[test]
fn test_add_node_and_lookup() {
    let mut ring = HashRing::new();
    let node = Node::new(NodeId(1), "localhost:3001");

    assert!(ring.add_node(node.clone()));
    assert_eq!(ring.node_count(), 1);
    assert_eq!(ring.token_count(), 1);

    assert_eq!(ring.locate_node("test-key"), &node);
    assert_eq!(ring.get_node(&NodeId(1)), Some(&node));
    assert!(ring.contains_node(&NodeId(1)));
}

#[test]
fn test_node_placed_at_address_hash() {
    let mut ring = HashRing::new();
    ring.add_node(Node::new(NodeId(0), "localhost:3000"));
    assert_eq!(ring.circle(), &[HashToken::from_key("localhost:3000")]);
    assert_eq!(ring.hash("localhost:3000"), HashToken::from_key("localhost:3000"));
}

#[test]
fn test_duplicate_id_rejected() {
    let mut ring = three_nodes();
    let circle_before = ring.circle().to_vec();
    let tokens_before = ring.tokens();

    // Same id, different address: still rejected.
    assert!(!ring.add_node(Node::new(NodeId(1), "localhost:4001")));
    assert!(!ring.add_node(Node::new(NodeId(1), "localhost:3001")));

    assert_eq!(ring.circle(), circle_before.as_slice());
    assert_eq!(ring.tokens(), tokens_before);
    assert_eq!(ring.node_count(), 3);
}

#[test]
fn test_try_add_node_reports_duplicate() {
    let mut ring = HashRing::new();
    assert_eq!(ring.try_add_node(Node::new(NodeId(5), "a:1")), Ok(()));
    assert_eq!(
        ring.try_add_node(Node::new(NodeId(5), "b:2")),
        Err(Error::DuplicateNode(NodeId(5)))
    );
}

// ============================================================================
// Multiple Nodes Tests
// ============================================================================

#[test]
fn test_circle_sorted_after_each_admission() {
    let mut ring = HashRing::new();
    for i in 0..16u64 {
        ring.add_node(Node::new(NodeId(i), format!("10.0.0.{i}:7000")));
        let circle = ring.circle();
        assert!(circle.windows(2).all(|w| w[0] < w[1]), "circle must stay sorted");
        assert_eq!(circle.len(), (i + 1) as usize);
    }
}

#[test]
fn test_three_node_scenario() {
    let ring = three_nodes();
    assert_eq!(ring.node_count(), 3);

    let ids = [NodeId(0), NodeId(1), NodeId(2)];
    for key in 1..=10 {
        let key = key.to_string();
        let owner = ring.locate_node(&key).id;
        assert!(ids.contains(&owner), "key {key} mapped outside the ring");
        for _ in 0..100 {
            assert_eq!(ring.locate_node(&key).id, owner, "key {key} moved");
        }
    }
}

#[test]
fn test_nodes_and_tokens_in_circle_order() {
    let ring = numeric_ring(&[300, 100, 200]);
    let ids: Vec<NodeId> = ring.nodes().iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![NodeId(1), NodeId(2), NodeId(0)]);
    assert_eq!(
        ring.tokens(),
        vec![
            (HashToken(100), NodeId(1)),
            (HashToken(200), NodeId(2)),
            (HashToken(300), NodeId(0)),
        ]
    );
}

// ============================================================================
// Wraparound Resolution
// ============================================================================

#[test]
fn test_wraparound_resolution_three_nodes() {
    // Circle [100, 200, 300] bound to nodes 0, 1, 2.
    let ring = numeric_ring(&[100, 200, 300]);
    let owner = |probe: u32| ring.locate_node(&probe.to_string()).id;

    // At or below the first position: successor index 0.
    assert_eq!(owner(0), NodeId(0));
    assert_eq!(owner(100), NodeId(0));
    // Successor index 1 is neither edge: returned directly.
    assert_eq!(owner(101), NodeId(1));
    assert_eq!(owner(200), NodeId(1));
    // Successor is the last index: forced over to index 0.
    assert_eq!(owner(201), NodeId(0));
    assert_eq!(owner(300), NodeId(0));
    // Past every position: stays on the last node instead of wrapping.
    assert_eq!(owner(301), NodeId(2));
    assert_eq!(owner(u32::MAX), NodeId(2));
}

#[test]
fn test_wraparound_single_node() {
    let ring = numeric_ring(&[500]);
    for probe in [0u32, 499, 500, 501, u32::MAX] {
        assert_eq!(ring.search_index(&HashToken(probe)), Some(0));
        assert_eq!(ring.locate_node(&probe.to_string()).id, NodeId(0));
    }
}

#[test]
fn test_two_nodes_never_reach_second_from_below() {
    let ring = numeric_ring(&[100, 200]);
    assert_eq!(ring.locate_node("50").id, NodeId(0));
    assert_eq!(ring.locate_node("150").id, NodeId(0));
    assert_eq!(ring.locate_node("250").id, NodeId(1));
}

// ============================================================================
// Edge Cases
// ============================================================================

#[test]
fn test_position_collision_overwrites() {
    let mut ring = HashRing::with_partitioner(NumericPartitioner);
    assert!(ring.add_node(Node::new(NodeId(1), "100")));
    // Distinct id, same position: admitted, earlier mapping replaced.
    assert!(ring.add_node(Node::new(NodeId(2), "100")));

    assert_eq!(ring.node_count(), 2);
    assert_eq!(ring.token_count(), 1);
    assert_eq!(ring.locate_node("42").id, NodeId(2));
    assert!(ring.contains_node(&NodeId(1)));
    assert_eq!(ring.get_node(&NodeId(1)), None);
}

#[test]
fn test_builder_skips_duplicates() {
    let ring = RingBuilder::new()
        .add_node(Node::new(NodeId(1), "localhost:3001"))
        .add_node(Node::new(NodeId(1), "localhost:9999"))
        .build();
    assert_eq!(ring.node_count(), 1);
    assert_eq!(ring.get_node(&NodeId(1)).unwrap().address, "localhost:3001");
}

#[test]
fn test_partitioner_name() {
    assert_eq!(HashRing::new().partitioner_name(), "Crc32Partitioner");
    assert_eq!(
        HashRing::with_partitioner(NumericPartitioner).partitioner_name(),
        "NumericPartitioner"
    );
}

#[test]
fn test_crc32_partitioner_matches_token_hash() {
    let partitioner = Crc32Partitioner;
    for key in ["", "1", "localhost:3000", "123456789"] {
        assert_eq!(partitioner.partition(key.as_bytes()), HashToken::from_key(key));
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_hash_is_deterministic(input in ".*") {
        let ring = HashRing::new();
        prop_assert_eq!(ring.hash(&input), ring.hash(&input));
        prop_assert_eq!(ring.hash(&input), HashToken(crc32_reference(input.as_bytes())));
    }

    #[test]
    fn prop_lookup_is_stable(key in ".*") {
        let ring = three_nodes();
        let first = ring.locate_node(&key).id;
        for _ in 0..10 {
            prop_assert_eq!(ring.locate_node(&key).id, first);
        }
    }

    #[test]
    fn prop_lookup_matches_resolution_rule(
        positions in proptest::collection::btree_set(any::<u32>(), 1..8),
        probe in any::<u32>(),
    ) {
        let positions: Vec<u32> = positions.into_iter().collect();
        let ring = numeric_ring(&positions);
        let last = positions.len() - 1;
        let expected = match positions.iter().position(|&p| p >= probe) {
            None => last,
            Some(i) if i == last => 0,
            Some(i) => i,
        };
        prop_assert_eq!(ring.search_index(&HashToken(probe)), Some(expected));
        prop_assert_eq!(
            ring.locate_node(&probe.to_string()).address.clone(),
            positions[expected].to_string()
        );
    }
}

/// Bitwise CRC-32 (IEEE, reflected) used to cross-check the partitioner.
fn crc32_reference(data: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
        }
    }
    !crc
}
