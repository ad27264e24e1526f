//! HTTP handlers for the store endpoints.

use std::sync::Arc;

use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;
use tracing::{debug, warn};

use corelib::KeyValue;

use crate::error::StoreError;
use crate::store::KvStore;

fn parse_key(raw: &str) -> Result<i64, StoreError> {
    raw.parse().map_err(|_| {
        warn!(key = raw, "rejecting non-integer key");
        StoreError::InvalidKey(raw.to_string())
    })
}

/// `PUT /keys/{key}/{value}`
pub async fn handle_put(
    Extension(store): Extension<Arc<KvStore>>,
    Path((key, value)): Path<(String, String)>,
) -> Result<StatusCode, StoreError> {
    let key = parse_key(&key)?;
    debug!(key, %value, "put");
    store.put(key, value);
    Ok(StatusCode::OK)
}

/// `GET /keys/{key}`
///
/// An absent key answers with the empty record rather than a 404.
pub async fn handle_get(
    Extension(store): Extension<Arc<KvStore>>,
    Path(key): Path<String>,
) -> Result<Json<KeyValue>, StoreError> {
    let key = parse_key(&key)?;
    let record = store.get(key).unwrap_or_default();
    debug!(key, found = !record.is_empty(), "get");
    Ok(Json(record))
}

/// `GET /keys`
pub async fn handle_get_all(Extension(store): Extension<Arc<KvStore>>) -> Json<Vec<KeyValue>> {
    Json(store.dump())
}
