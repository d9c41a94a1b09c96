//! Test server harness for E2E testing
//!
//! Provides `TestJokeServer` for spawning real joke service instances in tests.

use joke_service::observability::RequestMetrics;
use joke_service::repositories::JokeStore;
use joke_service::routes::{self, AppState};
use joke_service::services::{IndexSource, TimeSeededIndex};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Test harness for spawning the joke service in E2E tests.
///
/// Each server gets its own metrics aggregator, so counters start at zero.
///
/// # Example
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_joke_e2e() -> Result<()> {
///     let server = TestJokeServer::spawn().await?;
///
///     let response = reqwest::get(format!("{}/joke", server.url())).await?;
///
///     assert_eq!(response.status(), 200);
///     Ok(())
/// }
/// ```
pub struct TestJokeServer {
    addr: SocketAddr,
    state: Arc<AppState>,
    _handle: JoinHandle<()>,
}

impl TestJokeServer {
    /// Spawn a server with the built-in jokes and a time-seeded source.
    pub async fn spawn() -> Result<Self, anyhow::Error> {
        Self::spawn_with(JokeStore::builtin(), Arc::new(TimeSeededIndex)).await
    }

    /// Spawn a server with a custom store and index source.
    ///
    /// The server will:
    /// - Bind to a random available port (127.0.0.1:0)
    /// - Start the HTTP server in the background
    pub async fn spawn_with(
        store: JokeStore,
        index_source: Arc<dyn IndexSource>,
    ) -> Result<Self, anyhow::Error> {
        let metrics = RequestMetrics::new()
            .map_err(|e| anyhow::anyhow!("Failed to create metrics: {}", e))?;

        let state = Arc::new(AppState {
            store: Arc::new(store),
            index_source,
            metrics,
        });

        // Build routes using joke-service's real route builder
        let app = routes::build_routes(state.clone());

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        // Spawn server in background
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Test server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            state,
            _handle: handle,
        })
    }

    /// Get the base URL of the test server.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the socket address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Get the store the server is serving from.
    pub fn store(&self) -> &JokeStore {
        &self.state.store
    }

    /// Render the server's metrics directly, bypassing HTTP.
    pub fn render_metrics(&self) -> String {
        self.state.metrics.render()
    }
}

impl Drop for TestJokeServer {
    fn drop(&mut self) {
        // Abort the HTTP server task so the port is released when the test ends.
        self._handle.abort();
    }
}

/// Value of the first sample line for `metric` whose labels contain every
/// entry of `labels` (each given as `key="value"`).
///
/// Returns `None` when no such series has been rendered.
pub fn metric_value(rendered: &str, metric: &str, labels: &[&str]) -> Option<f64> {
    rendered
        .lines()
        .filter(|line| !line.starts_with('#'))
        .filter(|line| {
            line.strip_prefix(metric)
                .is_some_and(|rest| rest.starts_with('{') || rest.starts_with(' '))
        })
        .filter(|line| labels.iter().all(|label| line.contains(label)))
        .find_map(|line| line.rsplit(' ').next()?.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_server_spawns_successfully() -> Result<(), anyhow::Error> {
        let server = TestJokeServer::spawn().await?;

        assert!(server.url().starts_with("http://127.0.0.1:"));

        let response = reqwest::get(format!("{}/health", server.url())).await?;
        assert_eq!(response.status(), 200);
        assert_eq!(response.text().await?, "OK");

        Ok(())
    }

    #[tokio::test]
    async fn test_server_provides_addr() -> Result<(), anyhow::Error> {
        let server = TestJokeServer::spawn().await?;
        let addr = server.addr();

        assert!(addr.ip().is_loopback());
        assert!(addr.port() > 0);
        assert_eq!(server.url(), format!("http://{}", addr));

        Ok(())
    }

    #[tokio::test]
    async fn test_multiple_servers_have_isolated_metrics() -> Result<(), anyhow::Error> {
        let server1 = TestJokeServer::spawn().await?;
        let server2 = TestJokeServer::spawn().await?;
        assert_ne!(server1.addr(), server2.addr());

        reqwest::get(format!("{}/joke", server1.url())).await?;

        assert_eq!(
            metric_value(
                &server1.render_metrics(),
                "api_requests_total",
                &["endpoint=\"/joke\""]
            ),
            Some(1.0)
        );
        assert_eq!(
            metric_value(
                &server2.render_metrics(),
                "api_requests_total",
                &["endpoint=\"/joke\""]
            ),
            None
        );

        Ok(())
    }

    #[test]
    fn test_metric_value_parses_matching_series() {
        let rendered = "\
# TYPE api_requests_total counter
api_requests_total{endpoint=\"/joke\",method=\"GET\"} 12
api_requests_total{endpoint=\"/metrics\",method=\"GET\"} 3
api_requests_total_extra{endpoint=\"/joke\"} 99
";

        assert_eq!(
            metric_value(rendered, "api_requests_total", &["endpoint=\"/joke\""]),
            Some(12.0)
        );
        assert_eq!(
            metric_value(
                rendered,
                "api_requests_total",
                &["endpoint=\"/metrics\"", "method=\"GET\""]
            ),
            Some(3.0)
        );
        assert_eq!(
            metric_value(rendered, "api_requests_total", &["method=\"POST\""]),
            None
        );
    }
}
