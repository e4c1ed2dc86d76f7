//! In-memory store guarded by a single async lock.
//!
//! All four store traits share one [`MemoryState`] so that cascading
//! deletes touch every table under the same write guard.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use flashdeck_core::error::AppError;
use flashdeck_core::result::AppResult;
use flashdeck_core::types::VisibilityScope;
use flashdeck_entity::category::{Category, CreateCategory, UpdateCategory, descendant_ids};
use flashdeck_entity::flashcard::{
    CreateFlashcard, Flashcard, FlashcardDetail, FlashcardFilter, ReviewState, UpdateFlashcard,
};
use flashdeck_entity::tag::{CreateTag, Tag, UpdateTag};
use flashdeck_entity::user::{CreateUser, User, UserRole};

use crate::store::{CategoryStore, FlashcardStore, TagStore, UserStore};

#[derive(Debug, Default)]
struct MemoryState {
    users: HashMap<Uuid, User>,
    categories: HashMap<Uuid, Category>,
    tags: HashMap<Uuid, Tag>,
    flashcards: HashMap<Uuid, Flashcard>,
    /// Sorted, de-duplicated tag ids per flashcard.
    links: HashMap<Uuid, Vec<Uuid>>,
}

impl MemoryState {
    fn all_categories(&self) -> Vec<Category> {
        self.categories.values().cloned().collect()
    }

    fn sibling_taken(
        &self,
        owner_id: Uuid,
        name: &str,
        parent_id: Option<Uuid>,
        except: Option<Uuid>,
    ) -> bool {
        self.categories.values().any(|c| {
            Some(c.id) != except
                && c.owner_id == owner_id
                && c.name == name
                && c.parent_id == parent_id
        })
    }

    fn tag_name_taken(&self, owner_id: Uuid, name: &str, except: Option<Uuid>) -> bool {
        self.tags
            .values()
            .any(|t| Some(t.id) != except && t.owner_id == owner_id && t.name == name)
    }

    fn detail(&self, card: &Flashcard) -> FlashcardDetail {
        FlashcardDetail {
            flashcard: card.clone(),
            tag_ids: self.links.get(&card.id).cloned().unwrap_or_default(),
        }
    }

    /// Keep only tag ids that exist, sorted and de-duplicated.
    fn normalize_tags(&self, tag_ids: &[Uuid]) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = tag_ids
            .iter()
            .copied()
            .filter(|id| self.tags.contains_key(id))
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }

    /// Remove categories by id and null the category of their flashcards.
    fn remove_categories(&mut self, ids: &[Uuid]) -> usize {
        for card in self.flashcards.values_mut() {
            if card.category_id.is_some_and(|c| ids.contains(&c)) {
                card.category_id = None;
            }
        }
        ids.iter()
            .filter(|id| self.categories.remove(*id).is_some())
            .count()
    }

    fn remove_tag(&mut self, id: Uuid) -> bool {
        for tags in self.links.values_mut() {
            tags.retain(|t| *t != id);
        }
        self.tags.remove(&id).is_some()
    }

    fn remove_flashcard(&mut self, id: Uuid) -> bool {
        self.links.remove(&id);
        self.flashcards.remove(&id).is_some()
    }
}

/// Process-local store implementing every store trait.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let wanted = username.to_lowercase();
        Ok(self
            .state
            .read()
            .await
            .users
            .values()
            .find(|u| u.username.to_lowercase() == wanted)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.state.read().await.users.values().cloned().collect();
        users.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.username.cmp(&b.username))
        });
        Ok(users)
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut state = self.state.write().await;
        let wanted = data.username.to_lowercase();
        if state.users.values().any(|u| u.username.to_lowercase() == wanted) {
            return Err(AppError::conflict(format!(
                "Username '{}' is already taken",
                data.username
            )));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: data.username.clone(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            role: data.role,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_role(&self, id: Uuid, role: UserRole) -> AppResult<User> {
        let mut state = self.state.write().await;
        let user = state
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        user.role = role;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn touch_last_login(&self, id: Uuid) -> AppResult<()> {
        if let Some(user) = self.state.write().await.users.get_mut(&id) {
            user.last_login_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&id) {
            return Ok(false);
        }

        let cards: Vec<Uuid> = state
            .flashcards
            .values()
            .filter(|c| c.owner_id == id)
            .map(|c| c.id)
            .collect();
        for card in cards {
            state.remove_flashcard(card);
        }

        let tags: Vec<Uuid> = state
            .tags
            .values()
            .filter(|t| t.owner_id == id)
            .map(|t| t.id)
            .collect();
        for tag in tags {
            state.remove_tag(tag);
        }

        let all = state.all_categories();
        let mut doomed: Vec<Uuid> = Vec::new();
        for root in all.iter().filter(|c| c.owner_id == id) {
            for cid in descendant_ids(root.id, &all) {
                if !doomed.contains(&cid) {
                    doomed.push(cid);
                }
            }
        }
        state.remove_categories(&doomed);

        state.users.remove(&id);
        debug!(user_id = %id, "Deleted user and owned content");
        Ok(true)
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Category>> {
        Ok(self.state.read().await.categories.get(&id).cloned())
    }

    async fn list(&self, scope: VisibilityScope) -> AppResult<Vec<Category>> {
        let mut categories: Vec<Category> = self
            .state
            .read()
            .await
            .categories
            .values()
            .filter(|c| scope.admits(c.owner_id, c.is_public))
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(categories)
    }

    async fn subtree_ids(&self, id: Uuid) -> AppResult<Vec<Uuid>> {
        let state = self.state.read().await;
        if !state.categories.contains_key(&id) {
            return Ok(Vec::new());
        }
        Ok(descendant_ids(id, &state.all_categories()))
    }

    async fn create(&self, data: &CreateCategory) -> AppResult<Category> {
        let mut state = self.state.write().await;
        if state.sibling_taken(data.owner_id, &data.name, data.parent_id, None) {
            return Err(AppError::conflict(format!(
                "Category '{}' already exists at this level",
                data.name
            )));
        }

        let category = Category {
            id: Uuid::new_v4(),
            owner_id: data.owner_id,
            name: data.name.clone(),
            short_name: data.short_name.clone(),
            parent_id: data.parent_id,
            description: data.description.clone(),
            is_public: data.is_public,
        };
        state.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn update(&self, id: Uuid, data: &UpdateCategory) -> AppResult<Category> {
        let mut state = self.state.write().await;
        let owner_id = state
            .categories
            .get(&id)
            .map(|c| c.owner_id)
            .ok_or_else(|| AppError::not_found(format!("Category {id} not found")))?;

        if state.sibling_taken(owner_id, &data.name, data.parent_id, Some(id)) {
            return Err(AppError::conflict(format!(
                "Category '{}' already exists at this level",
                data.name
            )));
        }

        let category = state
            .categories
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Category {id} not found")))?;
        category.name = data.name.clone();
        category.short_name = data.short_name.clone();
        category.parent_id = data.parent_id;
        category.description = data.description.clone();
        category.is_public = data.is_public;
        Ok(category.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut state = self.state.write().await;
        if !state.categories.contains_key(&id) {
            return Ok(false);
        }
        let ids = descendant_ids(id, &state.all_categories());
        let removed = state.remove_categories(&ids);
        debug!(category_id = %id, categories = removed, "Deleted category subtree");
        Ok(true)
    }
}

#[async_trait]
impl TagStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Tag>> {
        Ok(self.state.read().await.tags.get(&id).cloned())
    }

    async fn find_many(&self, ids: &[Uuid]) -> AppResult<Vec<Tag>> {
        let state = self.state.read().await;
        let mut tags: Vec<Tag> = state
            .tags
            .values()
            .filter(|t| ids.contains(&t.id))
            .cloned()
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn list(&self, scope: VisibilityScope) -> AppResult<Vec<Tag>> {
        let mut tags: Vec<Tag> = self
            .state
            .read()
            .await
            .tags
            .values()
            .filter(|t| scope.admits(t.owner_id, t.is_public))
            .cloned()
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(tags)
    }

    async fn create(&self, data: &CreateTag) -> AppResult<Tag> {
        let mut state = self.state.write().await;
        if state.tag_name_taken(data.owner_id, &data.name, None) {
            return Err(AppError::conflict(format!("Tag '{}' already exists", data.name)));
        }

        let tag = Tag {
            id: Uuid::new_v4(),
            owner_id: data.owner_id,
            name: data.name.clone(),
            is_public: data.is_public,
        };
        state.tags.insert(tag.id, tag.clone());
        Ok(tag)
    }

    async fn update(&self, id: Uuid, data: &UpdateTag) -> AppResult<Tag> {
        let mut state = self.state.write().await;
        let owner_id = state
            .tags
            .get(&id)
            .map(|t| t.owner_id)
            .ok_or_else(|| AppError::not_found(format!("Tag {id} not found")))?;

        if state.tag_name_taken(owner_id, &data.name, Some(id)) {
            return Err(AppError::conflict(format!("Tag '{}' already exists", data.name)));
        }

        let tag = state
            .tags
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Tag {id} not found")))?;
        tag.name = data.name.clone();
        tag.is_public = data.is_public;
        Ok(tag.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.state.write().await.remove_tag(id))
    }
}

#[async_trait]
impl FlashcardStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<FlashcardDetail>> {
        let state = self.state.read().await;
        Ok(state.flashcards.get(&id).map(|card| state.detail(card)))
    }

    async fn list(
        &self,
        scope: VisibilityScope,
        filter: &FlashcardFilter,
    ) -> AppResult<Vec<FlashcardDetail>> {
        let state = self.state.read().await;
        let mut cards: Vec<FlashcardDetail> = state
            .flashcards
            .values()
            .filter(|c| scope.admits(c.owner_id, c.is_public))
            .map(|c| state.detail(c))
            .filter(|detail| filter.matches(detail))
            .collect();
        cards.sort_by(|a, b| {
            a.flashcard
                .created_at
                .cmp(&b.flashcard.created_at)
                .then_with(|| a.flashcard.id.cmp(&b.flashcard.id))
        });
        Ok(cards)
    }

    async fn count_public_in_category(&self, category_id: Uuid) -> AppResult<i64> {
        let state = self.state.read().await;
        let count = state
            .flashcards
            .values()
            .filter(|c| c.is_public && c.category_id == Some(category_id))
            .count();
        Ok(count as i64)
    }

    async fn count_public_with_tag(&self, tag_id: Uuid) -> AppResult<i64> {
        let state = self.state.read().await;
        let count = state
            .flashcards
            .values()
            .filter(|c| c.is_public)
            .filter(|c| state.links.get(&c.id).is_some_and(|tags| tags.contains(&tag_id)))
            .count();
        Ok(count as i64)
    }

    async fn create(&self, data: &CreateFlashcard) -> AppResult<FlashcardDetail> {
        let mut state = self.state.write().await;
        let review = ReviewState::default();
        let now = Utc::now();
        let card = Flashcard {
            id: Uuid::new_v4(),
            owner_id: data.owner_id,
            question: data.question.clone(),
            answer: data.answer.clone(),
            category_id: data.category_id,
            is_code_snippet: data.is_code_snippet,
            is_public: data.is_public,
            ease_factor: review.ease_factor,
            repetitions: review.repetitions,
            interval_days: review.interval_days,
            last_reviewed_at: review.last_reviewed_at,
            next_review_date: review.next_review_date,
            created_at: now,
            updated_at: now,
        };
        let tags = state.normalize_tags(&data.tag_ids);
        state.links.insert(card.id, tags);
        state.flashcards.insert(card.id, card.clone());
        Ok(state.detail(&card))
    }

    async fn update(&self, id: Uuid, data: &UpdateFlashcard) -> AppResult<FlashcardDetail> {
        let mut state = self.state.write().await;
        let tags = state.normalize_tags(&data.tag_ids);
        let card = state
            .flashcards
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Flashcard {id} not found")))?;
        card.question = data.question.clone();
        card.answer = data.answer.clone();
        card.category_id = data.category_id;
        card.is_code_snippet = data.is_code_snippet;
        card.is_public = data.is_public;
        card.updated_at = Utc::now();
        let card = card.clone();
        state.links.insert(id, tags);
        Ok(state.detail(&card))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.state.write().await.remove_flashcard(id))
    }
}
