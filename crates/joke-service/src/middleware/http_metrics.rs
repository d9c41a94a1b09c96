//! HTTP metrics middleware.
//!
//! Counts every request before it reaches a handler and times it afterwards.
//! Applied as the outermost layer, so 404 and 405 responses produced by the
//! router are observed too. The middleware never rejects or alters a request.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

use crate::observability::RequestMetrics;

/// Middleware that records request count and response time for all requests.
///
/// Order of operations:
/// 1. Increment `api_requests_total` (`endpoint`, `method`)
/// 2. Run the wrapped service
/// 3. Record elapsed seconds in `api_response_time_seconds`
///    (`endpoint`, `method`, `status_code`)
pub async fn http_metrics_middleware(
    State(metrics): State<RequestMetrics>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    metrics.record_request(&method, &path);

    let response = next.run(request).await;

    metrics.record_response_time(&method, &path, response.status().as_u16(), start.elapsed());

    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware,
        routing::get,
        Router,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn handler_200() -> &'static str {
        "OK"
    }

    async fn handler_400() -> (StatusCode, &'static str) {
        (StatusCode::BAD_REQUEST, "Bad")
    }

    fn test_app(metrics: RequestMetrics) -> Router {
        Router::new()
            .route("/joke", get(handler_200))
            .route("/health", get(handler_400))
            .layer(middleware::from_fn_with_state(
                metrics,
                http_metrics_middleware,
            ))
    }

    async fn send(app: Router, method: &str, uri: &str) -> Response {
        let request = HttpRequest::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("request builder should succeed");

        app.oneshot(request).await.expect("request should succeed")
    }

    #[tokio::test]
    async fn test_middleware_passes_response_through() {
        let metrics = RequestMetrics::new().unwrap();
        let response = send(test_app(metrics), "GET", "/joke").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn test_middleware_counts_and_times_request() {
        let metrics = RequestMetrics::new().unwrap();
        send(test_app(metrics.clone()), "GET", "/joke").await;

        let rendered = metrics.render();
        assert!(rendered
            .lines()
            .any(|l| l.starts_with("api_requests_total")
                && l.contains("endpoint=\"/joke\"")
                && l.contains("method=\"GET\"")
                && l.ends_with(" 1")));
        assert!(rendered
            .lines()
            .any(|l| l.starts_with("api_response_time_seconds_count")
                && l.contains("status_code=\"200\"")));
    }

    #[tokio::test]
    async fn test_middleware_records_handler_status() {
        let metrics = RequestMetrics::new().unwrap();
        let response = send(test_app(metrics.clone()), "GET", "/health").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        assert!(metrics
            .render()
            .lines()
            .any(|l| l.starts_with("api_response_time_seconds_count")
                && l.contains("status_code=\"400\"")));
    }

    #[tokio::test]
    async fn test_middleware_records_not_found() {
        let metrics = RequestMetrics::new().unwrap();
        let response = send(test_app(metrics.clone()), "GET", "/nonexistent").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let rendered = metrics.render();
        assert!(rendered
            .lines()
            .any(|l| l.starts_with("api_requests_total") && l.contains("endpoint=\"/other\"")));
    }

    #[tokio::test]
    async fn test_middleware_records_method_not_allowed() {
        let metrics = RequestMetrics::new().unwrap();
        let response = send(test_app(metrics.clone()), "POST", "/joke").await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        assert!(metrics
            .render()
            .lines()
            .any(|l| l.starts_with("api_requests_total") && l.contains("method=\"POST\"")));
    }
}
