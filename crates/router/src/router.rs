//! Key router.
//!
//! Owns the hash ring and a blocking HTTP client. Every key operation asks the
//! ring for the owning node and issues exactly one request to it: no retries,
//! no fan-out.

use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

use corelib::protocol::{self, KeyValue};
use corelib::{Crc32Partitioner, HashRing, Node, Partitioner, RingBuilder};

use crate::config::RouterConfig;
use crate::error::{Result, RouterError};

/// Routes put/get requests to the store owning each key.
pub struct Router<P: Partitioner = Crc32Partitioner> {
    ring: HashRing<P>,
    client: reqwest::blocking::Client,
}

impl Router<Crc32Partitioner> {
    /// Build a router whose ring holds `config.nodes`.
    pub fn new(config: RouterConfig) -> Result<Self> {
        let ring = RingBuilder::new().add_nodes(config.nodes.iter().cloned()).build();
        Self::with_ring(ring, &config)
    }
}

impl<P: Partitioner> Router<P> {
    /// Build a router around an existing ring. `config.nodes` is ignored.
    pub fn with_ring(ring: HashRing<P>, config: &RouterConfig) -> Result<Self> {
        Ok(Self {
            ring,
            client: config.build_client()?,
        })
    }

    pub fn ring(&self) -> &HashRing<P> {
        &self.ring
    }

    /// Admit another store. Returns `false` for an id already on the ring.
    pub fn add_node(&mut self, node: Node) -> bool {
        self.ring.add_node(node)
    }

    /// Node owning `key`.
    ///
    /// # Panics
    ///
    /// Panics if the ring is empty.
    pub fn locate(&self, key: &str) -> &Node {
        self.ring.locate_node(key)
    }

    /// Store `value` under `key` on the owning node.
    ///
    /// A transport failure is logged and the write is abandoned. Any reply
    /// that comes back counts as delivered, whatever its status; whether the
    /// store actually kept the value is not checked.
    ///
    /// # Panics
    ///
    /// Panics if the ring is empty.
    pub fn put(&self, key: &str, value: &str) -> bool {
        let node = self.ring.locate_node(key);
        let url = protocol::put_url(&node.address, key, value);
        record_request("put");
        match self.send(self.client.put(&url), &url) {
            Ok(reply) => {
                if !reply.status.is_success() {
                    warn!(%url, node_id = %node.id, status = %reply.status, "store rejected put");
                }
                info!(%url, node_id = %node.id, "put successful");
                true
            }
            Err(e) => {
                record_failure("put", &e);
                error!(%url, node_id = %node.id, error = %e, "put failed");
                false
            }
        }
    }

    /// Fetch the record for `key` from the owning node.
    ///
    /// Returns `None` when the request itself failed. Every reply body, error
    /// statuses included, is decoded; one that does not decode yields the
    /// empty record.
    ///
    /// # Panics
    ///
    /// Panics if the ring is empty.
    pub fn get(&self, key: &str) -> Option<KeyValue> {
        let node = self.ring.locate_node(key);
        let url = protocol::get_url(&node.address, key);
        record_request("get");
        let reply = match self.send(self.client.get(&url), &url) {
            Ok(reply) => reply,
            Err(e) => {
                record_failure("get", &e);
                error!(%url, node_id = %node.id, error = %e, "get failed");
                return None;
            }
        };
        let record: KeyValue = decode_or_default("get", &url, &reply.body);
        debug!(%url, node_id = %node.id, record = %protocol::encode(&record), "get");
        Some(record)
    }

    /// Dump every record held by the store at `address`.
    ///
    /// The address is taken as given; it does not need to be on the ring.
    pub fn get_all(&self, address: &str) -> Option<Vec<KeyValue>> {
        let url = protocol::get_all_url(address);
        record_request("get_all");
        let reply = match self.send(self.client.get(&url), &url) {
            Ok(reply) => reply,
            Err(e) => {
                record_failure("get_all", &e);
                error!(%url, error = %e, "get_all failed");
                return None;
            }
        };
        let records: Vec<KeyValue> = decode_or_default("get_all", &url, &reply.body);
        debug!(%url, count = records.len(), "get_all");
        Some(records)
    }

    /// Like [`Router::put`], but surfaces every failure, including an empty
    /// ring and a non-success status.
    pub fn try_put(&self, key: &str, value: &str) -> Result<()> {
        let node = self.ring.try_locate(key)?;
        let url = protocol::put_url(&node.address, key, value);
        self.send(self.client.put(&url), &url)?.success(&url).map(drop)
    }

    /// Like [`Router::get`], but surfaces every failure, including decode errors.
    pub fn try_get(&self, key: &str) -> Result<KeyValue> {
        let node = self.ring.try_locate(key)?;
        let url = protocol::get_url(&node.address, key);
        let body = self.send(self.client.get(&url), &url)?.success(&url)?;
        decode(&url, &body)
    }

    /// Like [`Router::get_all`], but surfaces every failure.
    pub fn try_get_all(&self, address: &str) -> Result<Vec<KeyValue>> {
        let url = protocol::get_all_url(address);
        let body = self.send(self.client.get(&url), &url)?.success(&url)?;
        decode(&url, &body)
    }

    /// Send a request and read the whole body. Only transport problems are errors.
    fn send(&self, request: reqwest::blocking::RequestBuilder, url: &str) -> Result<Reply> {
        let transport = |source: reqwest::Error| RouterError::Transport {
            url: url.to_string(),
            source,
        };
        let response = request.send().map_err(transport)?;
        let status = response.status();
        let body = response.bytes().map_err(transport)?;
        Ok(Reply {
            status,
            body: body.to_vec(),
        })
    }
}

/// A completed HTTP exchange.
struct Reply {
    status: reqwest::StatusCode,
    body: Vec<u8>,
}

impl Reply {
    fn success(self, url: &str) -> Result<Vec<u8>> {
        if self.status.is_success() {
            Ok(self.body)
        } else {
            Err(RouterError::Status {
                url: url.to_string(),
                status: self.status,
            })
        }
    }
}

fn decode<T: DeserializeOwned>(url: &str, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|source| RouterError::Decode {
        url: url.to_string(),
        source,
    })
}

fn decode_or_default<T: DeserializeOwned + Default>(op: &'static str, url: &str, body: &[u8]) -> T {
    decode(url, body).unwrap_or_else(|e| {
        record_failure(op, &e);
        warn!(%url, error = %e, "undecodable response, using empty value");
        T::default()
    })
}

fn record_request(op: &'static str) {
    metrics::counter!("router_requests_total", "op" => op).increment(1);
}

fn record_failure(op: &'static str, error: &RouterError) {
    metrics::counter!("router_failures_total", "op" => op, "kind" => error.kind()).increment(1);
}
