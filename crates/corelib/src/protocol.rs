//! Store wire protocol.
//!
//! Every store node exposes three endpoints:
//!
//! | Method & Path             | Response                               |
//! |---------------------------|----------------------------------------|
//! | `PUT /keys/{key}/{value}` | 200, empty body                        |
//! | `GET /keys/{key}`         | 200, one [`KeyValue`]                  |
//! | `GET /keys`               | 200, array of [`KeyValue`] sorted by key |
//!
//! Records omit a zero `key` and an empty `value` on the wire and default
//! them when absent.

use serde::{Deserialize, Serialize};

/// Route prefix shared by every store endpoint.
pub const KEYS_PATH: &str = "/keys";

/// A single stored record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub key: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
}

fn is_zero(key: &i64) -> bool {
    *key == 0
}

impl KeyValue {
    pub fn new(key: i64, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }

    /// True for the record produced by decoding `{}`.
    pub fn is_empty(&self) -> bool {
        self.key == 0 && self.value.is_empty()
    }
}

/// Orders records by key. Records with equal keys compare equal so a stable
/// sort keeps their insertion order.
pub fn compare_by_key(a: &KeyValue, b: &KeyValue) -> std::cmp::Ordering {
    a.key.cmp(&b.key)
}

/// Encode a record or a list of records the way the store does.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> String {
    // Plain structs of ints and strings cannot fail to serialize.
    serde_json::to_string(value).unwrap_or_default()
}

/// `http://{address}/keys/{key}/{value}`
pub fn put_url(address: &str, key: &str, value: &str) -> String {
    format!("http://{address}{KEYS_PATH}/{key}/{value}")
}

/// `http://{address}/keys/{key}`
pub fn get_url(address: &str, key: &str) -> String {
    format!("http://{address}{KEYS_PATH}/{key}")
}

/// `http://{address}/keys`
pub fn get_all_url(address: &str) -> String {
    format!("http://{address}{KEYS_PATH}")
}
