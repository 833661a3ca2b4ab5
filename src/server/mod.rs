//! Serving a router with graceful shutdown.

use crate::config::ServerConfig;
use crate::error::Result;
use axum::Router;
use tokio::signal;

/// Bind to `config.addr()` and serve `router` until Ctrl+C or SIGTERM.
///
/// # Example
///
/// ```rust,ignore
/// let config = ServerConfig::from_env()?;
/// let router = registry.into_router();
/// formroute::server::serve(router, &config).await?;
/// ```
pub async fn serve(router: Router, config: &ServerConfig) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(config.addr()).await?;
    tracing::info!(addr = %listener.local_addr()?, "Multipart server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Create a future that completes when a shutdown signal is received
///
/// If a signal handler cannot be installed that branch never completes, so
/// the other signal still triggers shutdown.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }
}
