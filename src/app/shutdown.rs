//! Graceful shutdown handling.

use tokio_util::sync::CancellationToken;

/// Cancels `cancel` when the process receives Ctrl-C.
///
/// Returns immediately if the token is cancelled by someone else first.
pub async fn cancel_on_ctrl_c(cancel: CancellationToken) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            match result {
                Ok(()) => log::info!("Received Ctrl-C, shutting down"),
                Err(e) => log::warn!("Failed to listen for Ctrl-C: {e}"),
            }
            cancel.cancel();
        }
        _ = cancel.cancelled() => {}
    }
}

/// Resolves once `cancel` has been cancelled.
///
/// Passed to axum's graceful shutdown so in-flight requests finish first.
pub async fn shutdown_signal(cancel: CancellationToken) {
    cancel.cancelled().await;
    log::info!("Shutdown signal received, draining in-flight requests");
}
