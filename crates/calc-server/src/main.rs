use std::sync::Arc;

use anyhow::Result;
use calc_server::config::ServerConfig;
use calc_server::{app, AppState, SERVICE_DESCRIPTION, SERVICE_TITLE, SERVICE_VERSION};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .compact()
        .init();

    let config = ServerConfig::from_env()?;
    info!("{} v{}: {}", SERVICE_TITLE, SERVICE_VERSION, SERVICE_DESCRIPTION);
    info!("Agent backend: {:?}", config.backend);

    let state = Arc::new(AppState::new(config.build_agent()));

    info!("Starting server on {}", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
