//! Middleware for the joke service.
//!
//! # Components
//!
//! - `http_metrics` - Request counter and response-time histogram

pub mod http_metrics;

pub use http_metrics::http_metrics_middleware;
