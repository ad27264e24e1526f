//! Router configuration.

use std::time::Duration;

use corelib::Node;

use crate::error::{Result, RouterError};

/// Settings for building a [`crate::Router`].
#[derive(Debug, Clone, Default)]
pub struct RouterConfig {
    /// Backend stores, admitted onto the ring in this order.
    pub nodes: Vec<Node>,
    /// Per-request timeout. `None` waits on a store indefinitely.
    pub request_timeout: Option<Duration>,
}

impl RouterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn with_nodes(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.nodes.extend(nodes);
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub(crate) fn build_client(&self) -> Result<reqwest::blocking::Client> {
        // The blocking client defaults to a 30s timeout; clear it unless configured.
        reqwest::blocking::Client::builder()
            .timeout(self.request_timeout)
            .build()
            .map_err(RouterError::Client)
    }
}
