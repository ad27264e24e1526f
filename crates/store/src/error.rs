//! Store error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Path key is not an integer.
    #[error("invalid key {0:?}: keys must be integers")]
    InvalidKey(String),
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        match self {
            StoreError::InvalidKey(_) => (StatusCode::BAD_REQUEST, self.to_string()).into_response(),
        }
    }
}
