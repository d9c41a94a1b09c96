//! Prometheus metrics endpoint handler.
//!
//! Provides `/metrics` for Prometheus scraping. The endpoint is
//! unauthenticated and exposes only bounded-cardinality operational labels.

use crate::routes::AppState;
use axum::{extract::State, response::IntoResponse};
use std::sync::Arc;

/// Handler for GET /metrics
///
/// Returns the accumulated request metrics in Prometheus text format:
/// ```text
/// # TYPE api_requests_total counter
/// api_requests_total{endpoint="/joke",method="GET"} 42
/// ```
#[tracing::instrument(skip_all, name = "joke.metrics.scrape")]
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.metrics.render()
}
