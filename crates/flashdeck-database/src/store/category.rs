//! Category store trait.

use async_trait::async_trait;
use uuid::Uuid;

use flashdeck_core::result::AppResult;
use flashdeck_core::types::VisibilityScope;
use flashdeck_entity::category::{Category, CreateCategory, UpdateCategory};

/// Persistence of the category tree.
#[async_trait]
pub trait CategoryStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a category by primary key, ignoring visibility.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Category>>;

    /// Categories admitted by `scope`, ordered by name.
    async fn list(&self, scope: VisibilityScope) -> AppResult<Vec<Category>>;

    /// `id` and every category below it, root first.
    async fn subtree_ids(&self, id: Uuid) -> AppResult<Vec<Uuid>>;

    /// Insert a category. Fails with a conflict when the owner already has a
    /// sibling with the same name.
    async fn create(&self, data: &CreateCategory) -> AppResult<Category>;

    /// Replace the mutable fields of a category.
    async fn update(&self, id: Uuid, data: &UpdateCategory) -> AppResult<Category>;

    /// Delete a category and its subtree. Flashcards filed under any deleted
    /// category keep existing with no category.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}
