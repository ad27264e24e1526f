//! CRC-32 partitioner implementation.

use crate::partitioner::traits::Partitioner;
use crate::token::HashToken;

/// Partitioner hashing keys with CRC-32 (IEEE polynomial) onto a 32-bit ring.
#[derive(Clone, Copy, Debug, Default)]
pub struct Crc32Partitioner;

impl Partitioner for Crc32Partitioner {
    type TokenType = HashToken;

    fn partition(&self, key: &[u8]) -> Self::TokenType {
        HashToken::from_bytes(key)
    }

    fn name(&self) -> &'static str {
        "Crc32Partitioner"
    }
}
