//! Record storage.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use corelib::KeyValue;

/// Append-only record store ordered by key.
///
/// Writing an existing key does not overwrite: every put adds another record.
/// Records sharing a key keep their insertion order.
#[derive(Debug, Default)]
pub struct KvStore {
    records: RwLock<BTreeMap<i64, Vec<String>>>,
}

impl KvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record.
    pub fn put(&self, key: i64, value: impl Into<String>) {
        self.records.write().entry(key).or_default().push(value.into());
        metrics::counter!("store_records_total").increment(1);
    }

    /// First record stored under `key`.
    pub fn get(&self, key: i64) -> Option<KeyValue> {
        self.records
            .read()
            .get(&key)
            .and_then(|values| values.first())
            .map(|value| KeyValue::new(key, value.clone()))
    }

    /// Every record, ascending by key.
    pub fn dump(&self) -> Vec<KeyValue> {
        self.records
            .read()
            .iter()
            .flat_map(|(key, values)| values.iter().map(|value| KeyValue::new(*key, value.clone())))
            .collect()
    }

    /// Total number of records, duplicates included.
    pub fn len(&self) -> usize {
        self.records.read().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}
