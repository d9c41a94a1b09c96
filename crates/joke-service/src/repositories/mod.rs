//! Repository layer for the joke service.
//!
//! Follows the Handler -> Service -> Repository layering. The only
//! repository is the static in-memory joke store.

pub mod joke_store;

pub use joke_store::{JokeStore, StoreError};
