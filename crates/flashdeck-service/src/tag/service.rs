//! Tag CRUD over the visibility policy.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use flashdeck_auth::VisibilityPolicy;
use flashdeck_core::error::AppError;
use flashdeck_database::store::{FlashcardStore, TagStore};
use flashdeck_entity::tag::{CreateTag, Tag, UpdateTag};

use crate::context::RequestContext;
use crate::field;

/// Client-supplied tag fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagInput {
    /// Tag name.
    pub name: String,
    /// Requested public flag; subject to downgrade.
    pub is_public: Option<bool>,
}

/// Manages tags.
#[derive(Debug, Clone)]
pub struct TagService {
    store: Arc<dyn TagStore>,
    flashcards: Arc<dyn FlashcardStore>,
    policy: VisibilityPolicy,
}

impl TagService {
    /// Creates a new tag service.
    pub fn new(
        store: Arc<dyn TagStore>,
        flashcards: Arc<dyn FlashcardStore>,
        policy: VisibilityPolicy,
    ) -> Self {
        Self {
            store,
            flashcards,
            policy,
        }
    }

    /// Every tag the caller may see.
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<Tag>, AppError> {
        self.store.list(self.policy.scope(&ctx.actor())).await
    }

    /// One visible tag.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Tag, AppError> {
        let found = self.store.find_by_id(id).await?;
        self.policy.require_visible(&ctx.actor(), found, "Tag")
    }

    /// Creates a tag owned by the caller.
    pub async fn create(&self, ctx: &RequestContext, input: TagInput) -> Result<Tag, AppError> {
        let data = CreateTag {
            owner_id: ctx.user_id,
            name: input.name,
            is_public: self
                .policy
                .resolve_public_flag(&ctx.actor(), input.is_public),
        };

        let tag = self.store.create(&data).await?;

        info!(
            user_id = %ctx.user_id,
            tag_id = %tag.id,
            is_public = tag.is_public,
            "Tag created"
        );

        Ok(tag)
    }

    /// Replaces a tag's name and public flag. A tag on public flashcards
    /// stays public.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        input: TagInput,
    ) -> Result<Tag, AppError> {
        let actor = ctx.actor();
        let existing = self.get(ctx, id).await?;
        self.policy.require_mutable(&actor, &existing, "Tag")?;

        let is_public = self
            .policy
            .resolve_updated_public_flag(&actor, input.is_public, existing.is_public);
        if existing.is_public && !is_public {
            let count = self.flashcards.count_public_with_tag(id).await?;
            if count > 0 {
                return Err(field::still_referenced("tag", count));
            }
        }

        let data = UpdateTag {
            name: input.name,
            is_public,
        };
        let tag = self.store.update(id, &data).await?;

        info!(user_id = %ctx.user_id, tag_id = %id, "Tag updated");

        Ok(tag)
    }

    /// Deletes a tag and detaches it from every flashcard.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        let existing = self.get(ctx, id).await?;
        self.policy.require_mutable(&ctx.actor(), &existing, "Tag")?;

        self.store.delete(id).await?;

        info!(user_id = %ctx.user_id, tag_id = %id, "Tag deleted");

        Ok(())
    }
}
