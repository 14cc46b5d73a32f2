use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ludex_core::{
    load_config, validate_config, DisabledSource, ExternalCatalogAdapter, GameSource,
    LocalStoreAdapter, SearchCoordinator,
};

use ludex_server::{create_router, metrics, AppState};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("LUDEX_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    validate_config(&config).context("Configuration validation failed")?;
    info!("Configuration loaded successfully");
    info!("Local store: {}", config.local_store.url);

    // Local store adapter, the primary record source
    let local: Arc<dyn GameSource> = Arc::new(
        LocalStoreAdapter::new(config.local_store.clone())
            .context("Failed to create local store adapter")?,
    );

    // External catalog adapter if configured, with the local store as
    // its fallback when the upstream is unreachable
    let external: Arc<dyn GameSource> = match &config.external_catalog {
        Some(ec_config) => {
            info!("External catalog: {}", ec_config.url);
            Arc::new(
                ExternalCatalogAdapter::new(ec_config.clone(), Arc::clone(&local))
                    .context("Failed to create external catalog adapter")?,
            )
        }
        None => {
            info!("No external catalog configured");
            Arc::new(DisabledSource)
        }
    };

    let coordinator = Arc::new(SearchCoordinator::new(
        config.coordinator.clone(),
        local,
        external,
    ));
    info!("Search coordinator initialized");

    // Touch the metrics registry so core metrics are registered before
    // the first scrape
    let _ = &*metrics::REGISTRY;

    let state = Arc::new(AppState::new(config.clone(), coordinator));
    let app = create_router(state);

    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
