//! Data models for the joke service.
//!
//! Contains the supported language set, the stored joke record, and the
//! JSON request/response bodies.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Language a joke can be requested in.
///
/// The set is closed: any code outside it is rejected at the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    English,
    Spanish,
    French,
    German,
    Hindi,
}

impl Language {
    /// Every supported language, in the order they are advertised to clients.
    pub const ALL: [Language; 5] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Hindi,
    ];

    /// Language used when a record has no text for the requested one.
    pub const FALLBACK: Language = Language::English;

    /// Lowercase two-letter code as used in the `lang` query parameter.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
            Language::Hindi => "hi",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Returned when a code is not one of the supported languages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    /// Codes are matched exactly; `EN` is not `en`.
    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == code)
            .ok_or_else(|| UnknownLanguage(code.to_string()))
    }
}

/// A single joke with its translations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JokeRecord {
    /// Unique identifier within the store.
    pub id: u32,

    /// Free-text tag (e.g., "programming").
    pub category: String,

    /// Joke text keyed by language.
    pub content: HashMap<Language, String>,
}

impl JokeRecord {
    /// Text for `lang`, or `None` if this record was never translated.
    pub fn text(&self, lang: Language) -> Option<&str> {
        self.content.get(&lang).map(String::as_str)
    }
}

/// Query parameters for `GET /joke`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct JokeQuery {
    pub lang: Option<String>,
}

impl JokeQuery {
    /// Parse a raw query string. Only the first `lang` pair counts; later
    /// duplicates and unrelated keys are ignored.
    pub fn from_query_string(raw: Option<&str>) -> Self {
        let lang = raw.and_then(|query| {
            form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == "lang")
                .map(|(_, value)| value.into_owned())
        });

        Self { lang }
    }
}

/// Response body for `GET /joke`.
///
/// `language` echoes the requested code even when the text came from the
/// English fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JokeResponse {
    pub joke: String,
    pub language: String,
}

/// Error body returned for rejected requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
