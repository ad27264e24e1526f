//! In-memory key-value store node.
//!
//! A store node keeps an append-only list of integer-keyed records and serves
//! them over HTTP (see [`corelib::protocol`] for the endpoints). Routers talk
//! to a fixed set of these nodes.

pub mod error;
pub mod handlers;
pub mod store;


use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, put};
use axum::{Extension, Router};
use tokio::net::TcpListener;
use tracing::info;

pub use error::StoreError;
pub use store::KvStore;

/// HTTP routes of a store node.
pub fn app(store: Arc<KvStore>) -> Router {
    Router::new()
        .route("/keys", get(handlers::handle_get_all))
        .route("/keys/:key", get(handlers::handle_get))
        .route("/keys/:key/:value", put(handlers::handle_put))
        .layer(Extension(store))
}

/// Serve `store` on an already bound listener until the task is dropped.
pub async fn serve(listener: TcpListener, store: Arc<KvStore>) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "store node listening");
    }
    axum::serve(listener, app(store)).await
}

/// Bind `addr` and serve a fresh, empty store.
pub async fn run(addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    serve(listener, Arc::new(KvStore::new())).await
}
