//! Observability module for the joke service.
//!
//! Provides the request metrics aggregator used by the HTTP middleware and
//! the `/metrics` scrape endpoint.

pub mod metrics;

pub use metrics::{MetricsError, RequestMetrics};
