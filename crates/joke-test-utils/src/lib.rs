//! # Joke Test Utilities
//!
//! Shared test utilities for the joke service.
//!
//! This crate provides:
//! - Server test harness (`TestJokeServer` for E2E tests)
//! - Prometheus text helpers (`metric_value`)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use joke_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<()> {
//!     let server = TestJokeServer::spawn().await?;
//!     let client = reqwest::Client::new();
//!
//!     let response = client
//!         .get(format!("{}/joke?lang=fr", server.url()))
//!         .send()
//!         .await?;
//!
//!     assert_eq!(response.status(), 200);
//!     Ok(())
//! }
//! ```

pub mod server_harness;

// Re-export commonly used items
pub use server_harness::*;
