//! HTTP routes for the joke service.
//!
//! Defines the Axum router and application state.

use crate::handlers;
use crate::middleware::http_metrics_middleware;
use crate::observability::RequestMetrics;
use crate::repositories::JokeStore;
use crate::services::{IndexSource, TimeSeededIndex};
use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Immutable joke collection.
    pub store: Arc<JokeStore>,

    /// Random index source used to pick a joke.
    pub index_source: Arc<dyn IndexSource>,

    /// Request metrics aggregator, also read by `/metrics`.
    pub metrics: RequestMetrics,
}

impl AppState {
    /// Production state: built-in jokes picked with a time-seeded source.
    pub fn new(metrics: RequestMetrics) -> Self {
        Self {
            store: Arc::new(JokeStore::builtin()),
            index_source: Arc::new(TimeSeededIndex),
            metrics,
        }
    }
}

/// Build the application routes.
///
/// Creates an Axum router with:
/// - `/joke` - Random joke, optional `lang` query parameter
/// - `/metrics` - Prometheus metrics endpoint
/// - `/health` - Liveness probe
/// - TraceLayer for request logging
/// - HTTP metrics middleware (outermost)
pub fn build_routes(state: Arc<AppState>) -> Router {
    let metrics = state.metrics.clone();

    // Layer order (bottom-to-top execution):
    // 1. TraceLayer - Log request details
    // 2. http_metrics_middleware - Count and time ALL requests (outermost)
    Router::new()
        .route("/joke", get(handlers::get_joke))
        .route("/metrics", get(handlers::metrics_handler))
        .route("/health", get(handlers::health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn_with_state(
            metrics,
            http_metrics_middleware,
        ))
}
