//! Consistent hash ring implementation.
//!
//! The ring manages node positions and answers which node owns a key.

pub mod circle;
pub mod ring;

pub use circle::{compare_tokens, Circle};
pub use ring::{HashRing, RingBuilder};
