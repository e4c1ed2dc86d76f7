//! Flashcard domain entities.

pub mod filter;
pub mod model;
pub mod review;

pub use filter::FlashcardFilter;
pub use model::{CreateFlashcard, Flashcard, FlashcardDetail, UpdateFlashcard};
pub use review::ReviewState;
