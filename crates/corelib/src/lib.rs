//! Core library for consistent hashing.
//!
//! This crate provides the fundamental abstractions for routing keys:
//! - Node identity and addressing
//! - Token types and the CRC-32 partitioner
//! - The hash ring and its key-to-node lookup
//! - The JSON record exchanged with store nodes

pub mod error;
pub mod node;
pub mod partitioner;
pub mod protocol;
pub mod ring;
pub mod token;

pub use error::{Error, Result};
pub use node::{Node, NodeId};
pub use partitioner::{Crc32Partitioner, Partitioner};
pub use protocol::KeyValue;
pub use ring::{HashRing, RingBuilder};
pub use token::{HashToken, Token};
