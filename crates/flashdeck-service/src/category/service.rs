//! Category CRUD over the visibility policy.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use flashdeck_auth::VisibilityPolicy;
use flashdeck_core::error::AppError;
use flashdeck_database::store::{CategoryStore, FlashcardStore};
use flashdeck_entity::category::{Category, CreateCategory, UpdateCategory};
use flashdeck_entity::user::Actor;

use crate::context::RequestContext;
use crate::field;

/// Client-supplied category fields. Ownership is never taken from input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryInput {
    /// Display name.
    pub name: String,
    /// Optional abbreviation.
    pub short_name: Option<String>,
    /// Parent category.
    pub parent_id: Option<Uuid>,
    /// Free-form description.
    pub description: Option<String>,
    /// Requested public flag; subject to downgrade.
    pub is_public: Option<bool>,
}

/// Manages the category tree.
#[derive(Debug, Clone)]
pub struct CategoryService {
    store: Arc<dyn CategoryStore>,
    flashcards: Arc<dyn FlashcardStore>,
    policy: VisibilityPolicy,
}

impl CategoryService {
    /// Creates a new category service.
    pub fn new(
        store: Arc<dyn CategoryStore>,
        flashcards: Arc<dyn FlashcardStore>,
        policy: VisibilityPolicy,
    ) -> Self {
        Self {
            store,
            flashcards,
            policy,
        }
    }

    /// Every category the caller may see.
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<Category>, AppError> {
        self.store.list(self.policy.scope(&ctx.actor())).await
    }

    /// One visible category.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Category, AppError> {
        let found = self.store.find_by_id(id).await?;
        self.policy.require_visible(&ctx.actor(), found, "Category")
    }

    /// Creates a category owned by the caller.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: CategoryInput,
    ) -> Result<Category, AppError> {
        let actor = ctx.actor();
        self.check_parent(&actor, input.parent_id).await?;

        let data = CreateCategory {
            owner_id: ctx.user_id,
            name: input.name,
            short_name: input.short_name,
            parent_id: input.parent_id,
            description: input.description,
            is_public: self.policy.resolve_public_flag(&actor, input.is_public),
        };

        let category = self.store.create(&data).await?;

        info!(
            user_id = %ctx.user_id,
            category_id = %category.id,
            is_public = category.is_public,
            "Category created"
        );

        Ok(category)
    }

    /// Replaces a category's fields. The owner stays unchanged, and the
    /// category cannot turn private while public flashcards are filed in it.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        input: CategoryInput,
    ) -> Result<Category, AppError> {
        let actor = ctx.actor();
        let existing = self.get(ctx, id).await?;
        self.policy.require_mutable(&actor, &existing, "Category")?;

        if let Some(parent_id) = input.parent_id {
            self.check_parent(&actor, Some(parent_id)).await?;
            if self.store.subtree_ids(id).await?.contains(&parent_id) {
                return Err(field::reject(
                    "parent",
                    "cycle",
                    "A category cannot be its own ancestor.",
                ));
            }
        }

        let is_public = self
            .policy
            .resolve_updated_public_flag(&actor, input.is_public, existing.is_public);
        if existing.is_public && !is_public {
            let count = self.flashcards.count_public_in_category(id).await?;
            if count > 0 {
                return Err(field::still_referenced("category", count));
            }
        }

        let data = UpdateCategory {
            name: input.name,
            short_name: input.short_name,
            parent_id: input.parent_id,
            description: input.description,
            is_public,
        };

        let category = self.store.update(id, &data).await?;

        info!(user_id = %ctx.user_id, category_id = %id, "Category updated");

        Ok(category)
    }

    /// Deletes a category with its subtree; filed flashcards lose their category.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        let existing = self.get(ctx, id).await?;
        self.policy
            .require_mutable(&ctx.actor(), &existing, "Category")?;

        self.store.delete(id).await?;

        info!(user_id = %ctx.user_id, category_id = %id, "Category deleted");

        Ok(())
    }

    async fn check_parent(&self, actor: &Actor, parent_id: Option<Uuid>) -> Result<(), AppError> {
        let Some(parent_id) = parent_id else {
            return Ok(());
        };
        let parent = self.store.find_by_id(parent_id).await?;
        match parent {
            Some(p) if self.policy.can_view(actor, &p) => Ok(()),
            _ => Err(field::reject(
                "parent",
                "does_not_exist",
                field::does_not_exist("category", parent_id),
            )),
        }
    }
}
