//! Flashcard list query-string extractor.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;

use flashdeck_core::error::AppError;
use flashdeck_entity::flashcard::FlashcardFilter;

use crate::error::ApiError;

/// Raw, unparsed query parameters.
#[derive(Debug, Default, Deserialize)]
struct RawFlashcardQuery {
    category_id: Option<String>,
    tag_ids: Option<String>,
    is_code_snippet: Option<String>,
    search: Option<String>,
}

/// A [`FlashcardFilter`] parsed once from the query string.
#[derive(Debug, Clone, Default)]
pub struct FlashcardQuery(pub FlashcardFilter);

impl<S> FromRequestParts<S> for FlashcardQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<RawFlashcardQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        let filter = FlashcardFilter::from_raw(
            raw.category_id.as_deref(),
            raw.tag_ids.as_deref(),
            raw.is_code_snippet.as_deref(),
            raw.search.as_deref(),
        )?;

        Ok(Self(filter))
    }
}
