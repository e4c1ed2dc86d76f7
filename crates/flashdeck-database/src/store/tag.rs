//! Tag store trait.

use async_trait::async_trait;
use uuid::Uuid;

use flashdeck_core::result::AppResult;
use flashdeck_core::types::VisibilityScope;
use flashdeck_entity::tag::{CreateTag, Tag, UpdateTag};

/// Persistence of tags.
#[async_trait]
pub trait TagStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a tag by primary key, ignoring visibility.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Tag>>;

    /// Every existing tag among `ids`, ignoring visibility. Unknown ids are skipped.
    async fn find_many(&self, ids: &[Uuid]) -> AppResult<Vec<Tag>>;

    /// Tags admitted by `scope`, ordered by name.
    async fn list(&self, scope: VisibilityScope) -> AppResult<Vec<Tag>>;

    /// Insert a tag. Fails with a conflict when the owner already has the name.
    async fn create(&self, data: &CreateTag) -> AppResult<Tag>;

    /// Replace the mutable fields of a tag.
    async fn update(&self, id: Uuid, data: &UpdateTag) -> AppResult<Tag>;

    /// Delete a tag and detach it from every flashcard.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}
