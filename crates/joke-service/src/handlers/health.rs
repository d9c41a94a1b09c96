//! Health check handler.
//!
//! `/health` is a liveness probe: it returns OK while the process is able
//! to serve requests and checks no dependencies.

/// Liveness probe handler.
///
/// Returns a plain-text "OK".
pub async fn health_check() -> &'static str {
    "OK"
}
