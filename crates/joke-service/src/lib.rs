//! Joke Service Library
//!
//! A small HTTP service that returns a random joke in one of five languages
//! and exposes Prometheus metrics for every request.
//!
//! # Architecture
//!
//! ```text
//! routes/mod.rs -> handlers/*.rs -> services/*.rs -> repositories/*.rs
//! ```
//!
//! # Modules
//!
//! - `config` - Service configuration from environment
//! - `errors` - Error types with HTTP status code mapping
//! - `handlers` - HTTP request handlers
//! - `middleware` - Request metrics middleware
//! - `models` - Languages, joke records and JSON bodies
//! - `observability` - Metrics aggregator
//! - `repositories` - In-memory joke store
//! - `routes` - Axum router setup
//! - `services` - Joke selection and localization

pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod routes;
pub mod services;
