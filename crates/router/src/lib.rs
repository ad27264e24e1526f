//! Client-side routing over a consistent hash ring.
//!
//! This crate dispatches key operations to backend stores:
//! - `put` / `get` go to the node the ring assigns to the key
//! - `get_all` dumps one explicitly addressed node
//!
//! Failures are logged and the operation is abandoned; callers running a
//! batch simply move on to the next key.

pub mod config;
pub mod error;
pub mod router;

pub use config::RouterConfig;
pub use error::{Result, RouterError};
pub use router::Router;
