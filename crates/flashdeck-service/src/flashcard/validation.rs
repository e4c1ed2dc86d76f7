//! Publication consistency of a flashcard.
//!
//! A public flashcard may only reference a public category and public tags.
//! Private flashcards are unconstrained. Category and tag failures are
//! reported together, category first.

use std::borrow::Cow;

use validator::ValidationErrors;

use flashdeck_entity::category::Category;
use flashdeck_entity::tag::Tag;

use crate::field;

/// A flashcard about to be written, with references already resolved.
#[derive(Debug, Clone, Copy)]
pub struct FlashcardCandidate<'a> {
    /// The effective public flag, after downgrade.
    pub is_public: bool,
    /// The referenced category, if any.
    pub category: Option<&'a Category>,
    /// The referenced tags.
    pub tags: &'a [Tag],
}

/// Checks that a public candidate references no private category or tag.
pub fn validate_flashcard(candidate: &FlashcardCandidate<'_>) -> Result<(), ValidationErrors> {
    if !candidate.is_public {
        return Ok(());
    }

    let mut errors = ValidationErrors::new();

    if candidate.category.is_some_and(|c| !c.is_public) {
        errors.add(
            "category",
            field::error(
                "private_category",
                "Public flashcards must reference a public category.",
            ),
        );
    }

    let private: Vec<String> = candidate
        .tags
        .iter()
        .filter(|t| !t.is_public)
        .map(|t| t.id.to_string())
        .collect();
    if !private.is_empty() {
        let mut err = field::error("private_tags", "Public flashcards may only use public tags.");
        err.add_param(Cow::from("private_tag_ids"), &private);
        errors.add("tags", err);
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
