//! Flashcard store trait.

use async_trait::async_trait;
use uuid::Uuid;

use flashdeck_core::result::AppResult;
use flashdeck_core::types::VisibilityScope;
use flashdeck_entity::flashcard::{
    CreateFlashcard, FlashcardDetail, FlashcardFilter, UpdateFlashcard,
};

/// Persistence of flashcards and their tag links.
#[async_trait]
pub trait FlashcardStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a flashcard by primary key, ignoring visibility.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<FlashcardDetail>>;

    /// Flashcards admitted by `scope` and matching `filter`, oldest first.
    /// A card appears at most once however many filter tags it carries.
    async fn list(
        &self,
        scope: VisibilityScope,
        filter: &FlashcardFilter,
    ) -> AppResult<Vec<FlashcardDetail>>;

    /// Number of public flashcards filed directly under `category_id`.
    async fn count_public_in_category(&self, category_id: Uuid) -> AppResult<i64>;

    /// Number of public flashcards carrying `tag_id`.
    async fn count_public_with_tag(&self, tag_id: Uuid) -> AppResult<i64>;

    /// Insert a flashcard with a fresh review schedule.
    async fn create(&self, data: &CreateFlashcard) -> AppResult<FlashcardDetail>;

    /// Replace content, category, tags and public flag. Owner and review
    /// schedule are left untouched.
    async fn update(&self, id: Uuid, data: &UpdateFlashcard) -> AppResult<FlashcardDetail>;

    /// Delete a flashcard and its tag links.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}
