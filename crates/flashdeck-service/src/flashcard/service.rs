//! Flashcard CRUD: visibility, public-flag downgrade, reference resolution
//! and the publication consistency check.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;
use validator::ValidationErrors;

use flashdeck_auth::VisibilityPolicy;
use flashdeck_core::error::AppError;
use flashdeck_database::store::{CategoryStore, FlashcardStore, TagStore};
use flashdeck_entity::category::Category;
use flashdeck_entity::flashcard::{
    CreateFlashcard, FlashcardDetail, FlashcardFilter, UpdateFlashcard,
};
use flashdeck_entity::tag::Tag;
use flashdeck_entity::user::Actor;

use super::validation::{FlashcardCandidate, validate_flashcard};
use crate::context::RequestContext;
use crate::field;

/// Client-supplied flashcard fields. Owner and review schedule are never
/// taken from input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlashcardInput {
    /// Prompt side.
    pub question: String,
    /// Answer side.
    pub answer: String,
    /// Optional category.
    pub category_id: Option<Uuid>,
    /// Attached tags.
    pub tag_ids: Vec<Uuid>,
    /// Whether the answer is a code snippet.
    pub is_code_snippet: bool,
    /// Requested public flag; subject to downgrade.
    pub is_public: Option<bool>,
}

/// Manages flashcards.
#[derive(Debug, Clone)]
pub struct FlashcardService {
    flashcards: Arc<dyn FlashcardStore>,
    categories: Arc<dyn CategoryStore>,
    tags: Arc<dyn TagStore>,
    policy: VisibilityPolicy,
}

impl FlashcardService {
    /// Creates a new flashcard service.
    pub fn new(
        flashcards: Arc<dyn FlashcardStore>,
        categories: Arc<dyn CategoryStore>,
        tags: Arc<dyn TagStore>,
        policy: VisibilityPolicy,
    ) -> Self {
        Self {
            flashcards,
            categories,
            tags,
            policy,
        }
    }

    /// Visible flashcards matching `filter`.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: &FlashcardFilter,
    ) -> Result<Vec<FlashcardDetail>, AppError> {
        let cards = self
            .flashcards
            .list(self.policy.scope(&ctx.actor()), filter)
            .await?;

        debug!(
            user_id = %ctx.user_id,
            filtered = !filter.is_empty(),
            count = cards.len(),
            "Listed flashcards"
        );

        Ok(cards)
    }

    /// One visible flashcard.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<FlashcardDetail, AppError> {
        let found = self.flashcards.find_by_id(id).await?;
        self.policy.require_visible(&ctx.actor(), found, "Flashcard")
    }

    /// Creates a flashcard owned by the caller.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: FlashcardInput,
    ) -> Result<FlashcardDetail, AppError> {
        let actor = ctx.actor();
        let is_public = self.policy.resolve_public_flag(&actor, input.is_public);
        let tag_ids = dedup(input.tag_ids);
        self.check_references(&actor, is_public, input.category_id, &tag_ids)
            .await?;

        let data = CreateFlashcard {
            owner_id: ctx.user_id,
            question: input.question,
            answer: input.answer,
            category_id: input.category_id,
            tag_ids,
            is_code_snippet: input.is_code_snippet,
            is_public,
        };

        let card = self.flashcards.create(&data).await?;

        info!(
            user_id = %ctx.user_id,
            flashcard_id = %card.flashcard.id,
            is_public = card.flashcard.is_public,
            tags = card.tag_ids.len(),
            "Flashcard created"
        );

        Ok(card)
    }

    /// Replaces a flashcard's content, references and public flag.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        input: FlashcardInput,
    ) -> Result<FlashcardDetail, AppError> {
        let actor = ctx.actor();
        let existing = self.get(ctx, id).await?;
        self.policy.require_mutable(&actor, &existing, "Flashcard")?;

        let is_public = self.policy.resolve_updated_public_flag(
            &actor,
            input.is_public,
            existing.flashcard.is_public,
        );
        let tag_ids = dedup(input.tag_ids);
        self.check_references(&actor, is_public, input.category_id, &tag_ids)
            .await?;

        let data = UpdateFlashcard {
            question: input.question,
            answer: input.answer,
            category_id: input.category_id,
            tag_ids,
            is_code_snippet: input.is_code_snippet,
            is_public,
        };

        let card = self.flashcards.update(id, &data).await?;

        info!(user_id = %ctx.user_id, flashcard_id = %id, "Flashcard updated");

        Ok(card)
    }

    /// Deletes a flashcard.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        let existing = self.get(ctx, id).await?;
        self.policy
            .require_mutable(&ctx.actor(), &existing, "Flashcard")?;

        self.flashcards.delete(id).await?;

        info!(user_id = %ctx.user_id, flashcard_id = %id, "Flashcard deleted");

        Ok(())
    }

    /// Resolves category and tags, then runs the consistency check.
    ///
    /// References the actor cannot see are reported exactly like missing ones.
    async fn check_references(
        &self,
        actor: &Actor,
        is_public: bool,
        category_id: Option<Uuid>,
        tag_ids: &[Uuid],
    ) -> Result<(), AppError> {
        let mut errors = ValidationErrors::new();

        let category: Option<Category> = match category_id {
            Some(id) => match self.categories.find_by_id(id).await? {
                Some(c) if self.policy.can_view(actor, &c) => Some(c),
                _ => {
                    errors.add(
                        "category",
                        field::error("does_not_exist", field::does_not_exist("category", id)),
                    );
                    None
                }
            },
            None => None,
        };

        let tags: Vec<Tag> = self
            .policy
            .visible_set(actor, self.tags.find_many(tag_ids).await?);
        if let Some(missing) = tag_ids.iter().find(|id| !tags.iter().any(|t| t.id == **id)) {
            errors.add(
                "tags",
                field::error("does_not_exist", field::does_not_exist("tag", *missing)),
            );
        }

        if !errors.is_empty() {
            return Err(errors.into());
        }

        let candidate = FlashcardCandidate {
            is_public,
            category: category.as_ref(),
            tags: &tags,
        };
        validate_flashcard(&candidate).map_err(|errors| {
            debug!(user_id = %actor.user_id, "Flashcard rejected by publication check");
            AppError::from(errors)
        })
    }
}

fn dedup(mut ids: Vec<Uuid>) -> Vec<Uuid> {
    ids.sort();
    ids.dedup();
    ids
}
