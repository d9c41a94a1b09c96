//! Joke Service
//!
//! Entry point: loads configuration, builds the metrics aggregator and
//! serves the joke API until SIGINT/SIGTERM.

use joke_service::config::Config;
use joke_service::observability::RequestMetrics;
use joke_service::routes::{self, AppState};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "joke_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Joke Service");

    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!(
        bind_address = %config.bind_address,
        drain_seconds = config.drain_seconds,
        "Configuration loaded successfully"
    );

    // Metrics failure means a broken deployment; refuse to start.
    let metrics = RequestMetrics::new().map_err(|e| {
        error!("Failed to initialize metrics: {}", e);
        e
    })?;

    let state = Arc::new(AppState::new(metrics));
    info!(jokes = state.store.len(), "Joke store loaded");

    let app = routes::build_routes(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .map_err(|e| {
            error!("Failed to bind {}: {}", config.bind_address, e);
            e
        })?;

    info!("Joke Service listening on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.drain_seconds))
        .await?;

    info!("Joke Service shutdown complete");

    Ok(())
}

/// Resolves on SIGINT or SIGTERM, then holds the server open for
/// `drain_seconds` so in-flight joke requests can finish.
async fn shutdown_signal(drain_seconds: u64) {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received SIGINT, starting graceful shutdown..."),
            Err(e) => error!("Failed to listen for SIGINT: {}", e),
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received SIGTERM, starting graceful shutdown...");
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    if drain_seconds == 0 {
        info!(drain_seconds, "config.drain_seconds is 0, shutting down without draining");
        return;
    }

    warn!(drain_seconds, "Draining in-flight requests before shutdown");
    tokio::time::sleep(Duration::from_secs(drain_seconds)).await;
    info!("Drain complete");
}
