//! 32-bit ring token.

use crate::token::traits::Token;
use std::fmt;

/// Position on a `[0, 2^32)` ring.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct HashToken(pub u32);

impl Token for HashToken {}

impl HashToken {
    /// Creates a token from a CRC-32 (IEEE) checksum of `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        HashToken(crc32fast::hash(data))
    }

    /// Creates a token from a string key.
    pub fn from_key(key: &str) -> Self {
        Self::from_bytes(key.as_bytes())
    }
}

impl fmt::Display for HashToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}
