//! Service layer for the joke service.
//!
//! # Components
//!
//! - `joke_selection` - Random joke pick with English fallback

pub mod joke_selection;

pub use joke_selection::{select_joke, IndexSource, SeededIndex, TimeSeededIndex};
