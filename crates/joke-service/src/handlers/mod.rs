//! HTTP request handlers for the joke service.

pub mod health;
pub mod jokes;
pub mod metrics;

pub use health::health_check;
pub use jokes::get_joke;
pub use metrics::metrics_handler;
