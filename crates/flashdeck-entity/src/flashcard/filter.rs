//! Typed flashcard list filter.
//!
//! Built once from query parameters at the request boundary and then passed
//! by reference to the store. All supplied criteria are AND-ed.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use flashdeck_core::error::AppError;

use super::model::FlashcardDetail;

/// Criteria for narrowing an already visibility-scoped flashcard listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardFilter {
    /// Keep cards in exactly this category.
    pub category_id: Option<Uuid>,
    /// Keep cards carrying at least one of these tags.
    pub tag_ids: Option<Vec<Uuid>>,
    /// Keep cards whose code-snippet flag equals this value.
    pub is_code_snippet: Option<bool>,
    /// Free text matched against question and answer.
    pub search: Option<String>,
}

impl FlashcardFilter {
    /// Parses raw query-string values.
    ///
    /// Empty `category_id`, `tag_ids` and `search` values count as absent.
    /// Any present `is_code_snippet` value filters for `true` only when it
    /// equals `"true"` case-insensitively.
    pub fn from_raw(
        category_id: Option<&str>,
        tag_ids: Option<&str>,
        is_code_snippet: Option<&str>,
        search: Option<&str>,
    ) -> Result<Self, AppError> {
        let category_id = match category_id.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(parse_id("category_id", raw)?),
            None => None,
        };

        let tag_ids = match tag_ids {
            Some(raw) => {
                let ids = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .map(|part| parse_id("tag_ids", part))
                    .collect::<Result<Vec<_>, _>>()?;
                if ids.is_empty() { None } else { Some(ids) }
            }
            None => None,
        };

        let is_code_snippet = is_code_snippet.map(|v| v.to_lowercase() == "true");

        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(Self {
            category_id,
            tag_ids,
            is_code_snippet,
            search,
        })
    }

    /// Whether no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.category_id.is_none()
            && self.tag_ids.is_none()
            && self.is_code_snippet.is_none()
            && self.search.is_none()
    }

    /// Lower-cased search terms; whitespace and commas separate terms.
    pub fn search_terms(&self) -> Vec<String> {
        self.search
            .as_deref()
            .map(|s| {
                s.split(|c: char| c.is_whitespace() || c == ',')
                    .filter(|term| !term.is_empty())
                    .map(str::to_lowercase)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Evaluates the filter against one card.
    pub fn matches(&self, detail: &FlashcardDetail) -> bool {
        let card = &detail.flashcard;

        if let Some(category_id) = self.category_id {
            if card.category_id != Some(category_id) {
                return false;
            }
        }

        if let Some(wanted) = &self.tag_ids {
            if !detail.tag_ids.iter().any(|tag| wanted.contains(tag)) {
                return false;
            }
        }

        if let Some(flag) = self.is_code_snippet {
            if card.is_code_snippet != flag {
                return false;
            }
        }

        let question = card.question.to_lowercase();
        let answer = card.answer.to_lowercase();
        self.search_terms()
            .iter()
            .all(|term| question.contains(term.as_str()) || answer.contains(term.as_str()))
    }
}

fn parse_id(field: &str, raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::validation(format!("Invalid {field} value '{raw}'")))
}
