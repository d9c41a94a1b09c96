//! Joke selection and localization.
//!
//! Picks one joke uniformly at random and resolves its text in the requested
//! language, falling back to English when the record was never translated.
//!
//! The random source is a trait so tests can substitute a deterministic one.
//! Production uses [`TimeSeededIndex`], which reseeds from the wall clock on
//! every call. This is not cryptographic and makes no anti-repeat guarantee.

use crate::models::{JokeRecord, JokeResponse, Language};
use crate::repositories::JokeStore;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of uniformly distributed indices (enables mocking).
pub trait IndexSource: Send + Sync {
    /// Returns an index in `0..len`, or `None` when `len` is zero.
    fn pick(&self, len: usize) -> Option<usize>;
}

/// Reseeds a fresh PRNG from the current time on every pick.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimeSeededIndex;

impl IndexSource for TimeSeededIndex {
    fn pick(&self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }

        // A clock before the epoch only degrades the seed, never the pick.
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default();

        let mut rng = StdRng::seed_from_u64(nanos);
        Some(rng.gen_range(0..len))
    }
}

/// Deterministic source driven by a single seeded PRNG.
///
/// Successive picks advance the same generator, so a fixed seed yields a
/// reproducible sequence across requests.
#[derive(Debug)]
pub struct SeededIndex {
    rng: Mutex<StdRng>,
}

impl SeededIndex {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl IndexSource for SeededIndex {
    fn pick(&self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }

        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        Some(rng.gen_range(0..len))
    }
}

/// Resolve a record's text for `lang`, falling back to English.
pub fn localize(record: &JokeRecord, lang: Language) -> Option<&str> {
    record
        .text(lang)
        .or_else(|| record.text(Language::FALLBACK))
}

/// Pick a joke and render it for `lang`.
///
/// The response's `language` is always `lang`, including when the text came
/// from the English fallback. Returns `None` only if the source yields no
/// usable index or the chosen record has no English text, neither of which
/// can happen for a validated store.
pub fn select_joke(
    store: &JokeStore,
    source: &dyn IndexSource,
    lang: Language,
) -> Option<JokeResponse> {
    let index = source.pick(store.len())?;
    let record = store.get(index)?;
    let joke = localize(record, lang)?;

    tracing::debug!(
        target: "joke.service.selection",
        joke_id = record.id,
        category = %record.category,
        language = %lang,
        fallback = record.text(lang).is_none(),
        "Selected joke"
    );

    Some(JokeResponse {
        joke: joke.to_string(),
        language: lang.code().to_string(),
    })
}

/// Mock index sources for testing.
pub mod mock {
    use super::IndexSource;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns the configured indices in order, cycling when exhausted.
    #[derive(Debug)]
    pub struct SequenceIndex {
        indices: Vec<usize>,
        call_count: AtomicUsize,
    }

    impl SequenceIndex {
        pub fn new(indices: Vec<usize>) -> Self {
            Self {
                indices,
                call_count: AtomicUsize::new(0),
            }
        }

        /// Always returns the same index.
        pub fn fixed(index: usize) -> Self {
            Self::new(vec![index])
        }

        /// Number of picks made so far.
        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    impl IndexSource for SequenceIndex {
        fn pick(&self, len: usize) -> Option<usize> {
            let count = self.call_count.fetch_add(1, Ordering::SeqCst);
            if len == 0 || self.indices.is_empty() {
                return None;
            }

            self.indices
                .get(count % self.indices.len())
                .map(|index| index % len)
        }
    }
}
