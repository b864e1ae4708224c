//! Listener TCP e desligamento gracioso.

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::service::FeedService;
use crate::{FeedError, FeedResult};

use super::routes::build_router;

/// Faz bind em `addr` e serve até Ctrl-C.
pub async fn serve(service: Arc<FeedService>, addr: &str) -> FeedResult<()> {
    let listener = TcpListener::bind(addr).await?;
    serve_with_shutdown(listener, service, shutdown_signal()).await
}

/// Serve num listener já vinculado até `shutdown` completar.
pub async fn serve_with_shutdown<S>(
    listener: TcpListener,
    service: Arc<FeedService>,
    shutdown: S,
) -> FeedResult<()>
where
    S: Future<Output = ()> + Send + 'static,
{
    let local_addr = listener.local_addr()?;
    tracing::info!(addr = %local_addr, "HTTP server listening");

    axum::serve(listener, build_router(service))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| FeedError::Server(e.to_string()))?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
