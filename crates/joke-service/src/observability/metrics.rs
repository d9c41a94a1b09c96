//! Request metrics for the joke service.
//!
//! All metrics follow Prometheus naming conventions:
//! - `api_` prefix
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! The recorder is built once at startup and carried in application state.
//! It is never installed as the process-wide recorder, so each server (and
//! each test server) aggregates its own series.
//!
//! # Cardinality
//!
//! - `method`: HTTP method
//! - `endpoint`: known routes, everything else collapsed to `/other`
//! - `status_code`: response status

use metrics::{counter, histogram, with_local_recorder};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusRecorder};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Counter incremented before each request is handled.
pub const REQUESTS_TOTAL: &str = "api_requests_total";

/// Histogram of wall-clock handling time in seconds.
pub const RESPONSE_TIME_SECONDS: &str = "api_response_time_seconds";

/// Buckets for response time; handlers do no I/O, so the range is tight.
const RESPONSE_TIME_BUCKETS: &[f64] = &[
    0.0005, 0.001, 0.0025, 0.005, 0.010, 0.025, 0.050, 0.100, 0.250, 0.500, 1.000,
];

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Failed to configure metrics recorder: {0}")]
    Build(String),
}

/// Process-wide metrics aggregator.
///
/// Cheap to clone; all clones share the same underlying storage.
#[derive(Clone)]
pub struct RequestMetrics {
    recorder: Arc<PrometheusRecorder>,
}

impl RequestMetrics {
    /// Build a recorder with response-time histogram buckets.
    ///
    /// # Errors
    ///
    /// Returns error if the bucket configuration is rejected.
    pub fn new() -> Result<Self, MetricsError> {
        let recorder = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Full(RESPONSE_TIME_SECONDS.to_string()),
                RESPONSE_TIME_BUCKETS,
            )
            .map_err(|e| MetricsError::Build(format!("response time buckets: {e}")))?
            .build_recorder();

        Ok(Self {
            recorder: Arc::new(recorder),
        })
    }

    /// Count a request about to be handled.
    ///
    /// Metric: `api_requests_total`
    /// Labels: `endpoint`, `method`
    pub fn record_request(&self, method: &str, path: &str) {
        let endpoint = normalize_endpoint(path);

        with_local_recorder(self.recorder.as_ref(), || {
            counter!(REQUESTS_TOTAL,
                "endpoint" => endpoint,
                "method" => method.to_string()
            )
            .increment(1);
        });
    }

    /// Record how long a request took.
    ///
    /// Metric: `api_response_time_seconds`
    /// Labels: `endpoint`, `method`, `status_code`
    pub fn record_response_time(
        &self,
        method: &str,
        path: &str,
        status_code: u16,
        duration: Duration,
    ) {
        let endpoint = normalize_endpoint(path);

        with_local_recorder(self.recorder.as_ref(), || {
            histogram!(RESPONSE_TIME_SECONDS,
                "endpoint" => endpoint,
                "method" => method.to_string(),
                "status_code" => status_code.to_string()
            )
            .record(duration.as_secs_f64());
        });
    }

    /// Render all series in Prometheus text exposition format.
    pub fn render(&self) -> String {
        self.recorder.handle().render()
    }
}

/// Normalize a request path to a bounded label value.
fn normalize_endpoint(path: &str) -> &'static str {
    match path {
        "/joke" => "/joke",
        "/metrics" => "/metrics",
        "/health" => "/health",
        _ => "/other",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn series_value(rendered: &str, name: &str, label: &str) -> Option<f64> {
        rendered
            .lines()
            .filter(|line| line.starts_with(name) && line.contains(label))
            .find_map(|line| line.rsplit(' ').next()?.parse().ok())
    }

    #[test]
    fn test_normalize_endpoint_known_paths() {
        assert_eq!(normalize_endpoint("/joke"), "/joke");
        assert_eq!(normalize_endpoint("/metrics"), "/metrics");
        assert_eq!(normalize_endpoint("/health"), "/health");
    }

    #[test]
    fn test_normalize_endpoint_unknown_paths() {
        assert_eq!(normalize_endpoint("/"), "/other");
        assert_eq!(normalize_endpoint("/joke/1"), "/other");
        assert_eq!(normalize_endpoint("/jokes"), "/other");
        assert_eq!(normalize_endpoint("/JOKE"), "/other");
    }

    #[test]
    fn test_record_request_increments_counter() {
        let metrics = RequestMetrics::new().unwrap();

        metrics.record_request("GET", "/joke");
        metrics.record_request("GET", "/joke");
        metrics.record_request("GET", "/joke");

        let rendered = metrics.render();
        assert_eq!(
            series_value(&rendered, REQUESTS_TOTAL, "endpoint=\"/joke\""),
            Some(3.0)
        );
    }

    #[test]
    fn test_record_request_labels_method_and_endpoint() {
        let metrics = RequestMetrics::new().unwrap();

        metrics.record_request("POST", "/nowhere");

        let rendered = metrics.render();
        let line = rendered
            .lines()
            .find(|line| line.starts_with(REQUESTS_TOTAL))
            .expect("counter series should be rendered");
        assert!(line.contains("method=\"POST\""));
        assert!(line.contains("endpoint=\"/other\""));
    }

    #[test]
    fn test_record_response_time_renders_histogram() {
        let metrics = RequestMetrics::new().unwrap();

        metrics.record_response_time("GET", "/joke", 200, Duration::from_millis(2));
        metrics.record_response_time("GET", "/joke", 200, Duration::from_millis(40));

        let rendered = metrics.render();
        assert!(rendered.contains("api_response_time_seconds_bucket"));
        assert_eq!(
            series_value(
                &rendered,
                "api_response_time_seconds_count",
                "status_code=\"200\""
            ),
            Some(2.0)
        );
    }

    #[test]
    fn test_recorders_are_isolated() {
        let first = RequestMetrics::new().unwrap();
        let second = RequestMetrics::new().unwrap();

        first.record_request("GET", "/joke");

        assert!(first.render().contains(REQUESTS_TOTAL));
        assert!(!second.render().contains(REQUESTS_TOTAL));
    }

    #[test]
    fn test_clones_share_storage() {
        let metrics = RequestMetrics::new().unwrap();
        let clone = metrics.clone();

        clone.record_request("GET", "/health");

        assert_eq!(
            series_value(&metrics.render(), REQUESTS_TOTAL, "endpoint=\"/health\""),
            Some(1.0)
        );
    }
}
