//! Core token trait definitions.

use std::fmt::Debug;
use std::hash::Hash;

/// Minimal token trait for the hash ring.
///
/// Tokens are immutable, comparable positions. Implementations must be
/// thread-safe and cheap to compare/hash. Ordering is the only structure the
/// ring relies on.
pub trait Token: Copy + Ord + Hash + Send + Sync + Debug + 'static {}
