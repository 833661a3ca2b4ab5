use formroute::prelude::*;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

mod modules;

use modules::admin::{AdminController, ArtifactStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,formroute=debug")),
        )
        .init();

    tracing::info!("🚀 Starting upload server...");

    let config = ServerConfig::from_env()?;

    // Route table is fixed before the server binds; any conflict aborts startup.
    let store = Arc::new(ArtifactStore::default());
    let mut registry = RouteRegistry::with_config(config.dispatcher.clone());
    registry.controller(Arc::new(AdminController::new(Arc::clone(&store))))?;

    for marker in registry.markers() {
        tracing::info!("  {}", marker);
    }

    let router = registry.into_router().layer(TraceLayer::new_for_http());
    formroute::server::serve(router, &config).await?;

    tracing::info!(
        joins = store.join_count(),
        artifacts = store.artifact_count(),
        "👋 Server stopped"
    );
    Ok(())
}
