//! Joke handler.
//!
//! `GET /joke?lang=<code>` returns one randomly chosen joke.

use crate::errors::ApiError;
use crate::models::{JokeQuery, JokeResponse, Language};
use crate::routes::AppState;
use crate::services::select_joke;
use axum::extract::{RawQuery, State};
use axum::Json;
use std::sync::Arc;

/// Handler for GET /joke
///
/// `lang` defaults to `en` when absent or empty; when repeated, the first
/// value wins. Codes outside the supported set are rejected with 400. The
/// response's `language` echoes the requested code even when the text was
/// served from the English fallback.
///
/// ## Example Response
///
/// ```json
/// {
///   "joke": "What do you call a fake noodle? An impasta.",
///   "language": "en"
/// }
/// ```
#[tracing::instrument(skip_all, name = "joke.get")]
pub async fn get_joke(
    State(state): State<Arc<AppState>>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<JokeResponse>, ApiError> {
    let query = JokeQuery::from_query_string(raw_query.as_deref());
    let lang = parse_lang(query.lang.as_deref())?;

    let response =
        select_joke(&state.store, state.index_source.as_ref(), lang).ok_or(ApiError::Internal)?;

    Ok(Json(response))
}

fn parse_lang(raw: Option<&str>) -> Result<Language, ApiError> {
    match raw {
        None | Some("") => Ok(Language::FALLBACK),
        Some(code) => code
            .parse()
            .map_err(|_| ApiError::UnsupportedLanguage(code.to_string())),
    }
}
