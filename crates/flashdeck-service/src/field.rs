//! Per-field rejection helpers.
//!
//! All field-level failures are expressed as `validator::ValidationErrors`
//! so the API returns one shape of `details` whether a rule came from a DTO
//! derive or from a service check.

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

use flashdeck_core::error::AppError;

/// Builds a single field error.
pub fn error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

/// Rejects the request with one failing field.
pub fn reject(
    field: &'static str,
    code: &'static str,
    message: impl Into<Cow<'static, str>>,
) -> AppError {
    let mut errors = ValidationErrors::new();
    errors.add(field, error(code, message));
    errors.into()
}

/// Rejects making a record private while public flashcards still use it.
pub fn still_referenced(kind: &str, count: i64) -> AppError {
    let cards = if count == 1 { "flashcard" } else { "flashcards" };
    reject(
        "is_public",
        "referenced_by_public_flashcards",
        format!("This {kind} is used by {count} public {cards} and must stay public."),
    )
}

/// Message used for a missing reference and for one the actor may not see.
pub fn does_not_exist(kind: &str, id: uuid::Uuid) -> String {
    format!("Invalid pk \"{id}\" - {kind} does not exist.")
}
