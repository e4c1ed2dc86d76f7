//! Flashcard use cases and the publication consistency check.

pub mod service;
pub mod validation;

pub use service::{FlashcardInput, FlashcardService};
pub use validation::{FlashcardCandidate, validate_flashcard};
