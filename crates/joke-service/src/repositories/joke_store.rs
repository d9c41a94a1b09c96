//! In-memory joke store.
//!
//! The store is built once at startup and shared read-only for the lifetime
//! of the process. There are no mutation operations.

use crate::models::{JokeRecord, Language};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Errors from building a store out of caller-supplied records.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Joke store must contain at least one record")]
    Empty,

    #[error("Duplicate joke id: {0}")]
    DuplicateId(u32),

    #[error("Joke {0} has no English text")]
    MissingFallback(u32),
}

/// Immutable, ordered, never-empty collection of jokes.
#[derive(Debug, Clone)]
pub struct JokeStore {
    records: Vec<JokeRecord>,
}

impl JokeStore {
    /// Build a store from arbitrary records.
    ///
    /// Every record must carry English text and a unique id, and the list
    /// must not be empty.
    pub fn from_records(records: Vec<JokeRecord>) -> Result<Self, StoreError> {
        if records.is_empty() {
            return Err(StoreError::Empty);
        }

        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(StoreError::DuplicateId(record.id));
            }
            if record.text(Language::FALLBACK).is_none() {
                return Err(StoreError::MissingFallback(record.id));
            }
        }

        Ok(Self { records })
    }

    /// The jokes served in production.
    pub fn builtin() -> Self {
        let records = BUILTIN_JOKES
            .iter()
            .map(|(id, category, texts)| JokeRecord {
                id: *id,
                category: (*category).to_string(),
                content: Language::ALL
                    .into_iter()
                    .zip(texts.iter())
                    .map(|(lang, text)| (lang, (*text).to_string()))
                    .collect::<HashMap<_, _>>(),
            })
            .collect();

        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a constructed store; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&JokeRecord> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[JokeRecord] {
        &self.records
    }
}

/// (id, category, texts in `Language::ALL` order)
type BuiltinJoke = (u32, &'static str, [&'static str; 5]);

const BUILTIN_JOKES: [BuiltinJoke; 5] = [
    (
        1,
        "science",
        [
            "Why don't scientists trust atoms? Because they make up everything.",
            "¿Por qué los científicos no confían en los átomos? Porque lo componen todo.",
            "Pourquoi les scientifiques ne font-ils pas confiance aux atomes ? Parce qu'ils inventent tout.",
            "Warum vertrauen Wissenschaftler Atomen nicht? Weil sie alles erfinden.",
            "वैज्ञानिक परमाणुओं पर विश्वास क्यों नहीं करते? क्योंकि वे सब कुछ बना देते हैं।",
        ],
    ),
    (
        2,
        "pun",
        [
            "I told my wife she was drawing her eyebrows too high. She looked surprised.",
            "Le dije a mi esposa que estaba dibujando sus cejas demasiado altas. Parecía sorprendida.",
            "J'ai dit à ma femme qu'elle dessinait ses sourcils trop haut. Elle avait l'air surprise.",
            "Ich sagte meiner Frau, dass sie ihre Augenbrauen zu hoch zeichnet. Sie sah überrascht aus.",
            "मैंने अपनी पत्नी से कहा कि वह अपनी भौंहें बहुत ऊंची बना रही है। वह आश्चर्यचकित दिखीं।",
        ],
    ),
    (
        3,
        "programming",
        [
            "Why did the programmer go broke? Because he lost his domain in a crash.",
            "¿Por qué el programador se quedó sin dinero? Porque perdió su dominio en un accidente.",
            "Pourquoi le programmeur est-il devenu pauvre ? Parce qu'il a perdu son domaine dans un crash.",
            "Warum ging der Programmierer pleite? Weil er seine Domain bei einem Absturz verloren hat.",
            "प्रोग्रामर कंगाल क्यों हो गया? क्योंकि उसने क्रैश में अपना डोमेन खो दिया।",
        ],
    ),
    (
        4,
        "programming",
        [
            "Why don't programmers like nature? It has too many bugs.",
            "¿Por qué a los programadores no les gusta la naturaleza? Tiene demasiados insectos.",
            "Pourquoi les programmeurs n'aiment pas la nature ? Elle a trop de bugs.",
            "Warum mögen Programmierer die Natur nicht? Sie hat zu viele Bugs.",
            "प्रोग्रामर प्रकृति को क्यों पसंद नहीं करते? इसमें बहुत सारे बग हैं।",
        ],
    ),
    (
        5,
        "food",
        [
            "What do you call a fake noodle? An impasta.",
            "¿Cómo se llama un fideo falso? Un impasta.",
            "Comment appelle-t-on de fausses nouilles ? Des impasstas.",
            "Wie nennt man eine gefälschte Nudel? Eine Impasta.",
            "नकली नूडल्स को क्या कहते हैं? इम्पास्ता।",
        ],
    ),
];
