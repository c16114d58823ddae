//! HTTP surface of the proxy.
//!
//! Provides four endpoints:
//! - `/meta` - metadata extraction for the `url` query parameter
//! - `/` - HTML landing page
//! - `/doc` - OpenAPI document
//! - `/status` - JSON request counters and uptime

mod handlers;
mod types;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::app::shutdown_signal;
use crate::config::Config;
use crate::initialization::init_client;
use handlers::{doc_handler, landing_handler, meta_handler, status_handler};
pub use types::AppState;

/// Builds the router with all routes bound to `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(landing_handler))
        .route("/meta", get(meta_handler))
        .route("/doc", get(doc_handler))
        .route("/status", get(status_handler))
        .with_state(state)
}

/// Serves the router on an already-bound listener until `cancel` fires.
///
/// In-flight requests are allowed to finish before this returns.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    cancel: CancellationToken,
) -> Result<(), anyhow::Error> {
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal(cancel))
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;
    Ok(())
}

/// Creates shared state from `config`, binds `config.bind` and serves until
/// `cancel` fires.
pub async fn start_server(config: &Config, cancel: CancellationToken) -> Result<(), anyhow::Error> {
    let client = init_client(config)?;
    let state = AppState::new(client, config.cache_max_age);

    let listener = TcpListener::bind(&config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind server to {}: {}", config.bind, e))?;
    let addr = listener.local_addr()?;

    log::info!("Page meta proxy listening on http://{}/", addr);
    log::info!("  - Extract: http://{}/meta?url=<absolute url>", addr);
    log::info!("  - Docs: http://{}/doc", addr);
    log::info!("  - Status: http://{}/status", addr);

    serve(listener, state, cancel).await
}
