//! HTTP transport for the issue store.
//!
//! A thin axum layer: each verb on `/api/issues/{project}` maps to one store
//! operation. The store sits behind a single `RwLock`; mutations hold the
//! write lock for their whole scan-and-mutate sequence.

mod extract;
pub mod handlers;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tracing::{info, warn};
use tracker_lib::InMemoryStore;

use crate::config::ServerConfig;

pub use extract::BodyFields;

/// Store handle shared by every request.
pub type SharedStore = Arc<RwLock<InMemoryStore>>;

/// Wrap a store for sharing.
#[must_use]
pub fn shared(store: InMemoryStore) -> SharedStore {
    Arc::new(RwLock::new(store))
}

/// Build the router over `store`.
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route(
            "/api/issues/{project}",
            get(handlers::list_issues)
                .post(handlers::create_issue)
                .put(handlers::update_issue)
                .delete(handlers::delete_issue),
        )
        .with_state(store)
}

/// Build the store from `config` and serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if seeding fails, the address cannot be bound, or the
/// server stops abnormally.
pub async fn serve(config: &ServerConfig) -> Result<()> {
    let store = config
        .build_store()
        .context("failed to load fixture data")?;
    let app = router(shared(store));

    let listener = TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    info!(addr = %config.addr, "Issue tracker listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Issue tracker stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}
