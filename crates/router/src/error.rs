//! Error types for routed requests.

use thiserror::Error;

/// Result type alias for the router crate.
pub type Result<T> = std::result::Result<T, RouterError>;

/// Ways a routed request can fail.
#[derive(Error, Debug)]
pub enum RouterError {
    /// The HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    /// Connection refused, DNS failure, timeout, or a broken body stream.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The store answered with a non-success status.
    #[error("{url} answered {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The response body was not the expected JSON.
    #[error("malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Ring(#[from] corelib::Error),
}

impl RouterError {
    /// Short label used for the `kind` metric dimension.
    pub fn kind(&self) -> &'static str {
        match self {
            RouterError::Client(_) => "client",
            RouterError::Transport { .. } => "transport",
            RouterError::Status { .. } => "status",
            RouterError::Decode { .. } => "decode",
            RouterError::Ring(_) => "ring",
        }
    }
}
