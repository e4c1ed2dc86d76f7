//! Flashcard entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::ownership::OwnedResource;

/// A question/answer card, as stored in the `flashcards` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Flashcard {
    /// Unique flashcard identifier.
    pub id: Uuid,
    /// The owning user.
    pub owner_id: Uuid,
    /// Prompt side.
    pub question: String,
    /// Answer side.
    pub answer: String,
    /// Optional category; nulled when the category is deleted.
    pub category_id: Option<Uuid>,
    /// Whether the answer is a code snippet.
    pub is_code_snippet: bool,
    /// Whether every user can see this card.
    pub is_public: bool,
    /// Ease multiplier.
    pub ease_factor: f64,
    /// Consecutive successful reviews.
    pub repetitions: i32,
    /// Current interval in days.
    pub interval_days: i32,
    /// When the card was last reviewed.
    pub last_reviewed_at: Option<DateTime<Utc>>,
    /// When the card is next due.
    pub next_review_date: Option<NaiveDate>,
    /// When the card was created.
    pub created_at: DateTime<Utc>,
    /// When the card was last modified.
    pub updated_at: DateTime<Utc>,
}

impl OwnedResource for Flashcard {
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    fn is_public(&self) -> bool {
        self.is_public
    }
}

/// A flashcard together with the ids of its tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashcardDetail {
    /// The card row.
    #[serde(flatten)]
    pub flashcard: Flashcard,
    /// Attached tag ids.
    #[serde(rename = "tags")]
    pub tag_ids: Vec<Uuid>,
}

impl OwnedResource for FlashcardDetail {
    fn owner_id(&self) -> Uuid {
        self.flashcard.owner_id
    }

    fn is_public(&self) -> bool {
        self.flashcard.is_public
    }
}

/// Data required to create a new flashcard.
///
/// `owner_id` and `is_public` are already resolved by the service layer;
/// the review schedule starts from [`ReviewState::default`](super::ReviewState::default).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFlashcard {
    /// The owning user.
    pub owner_id: Uuid,
    /// Prompt side.
    pub question: String,
    /// Answer side.
    pub answer: String,
    /// Optional category.
    pub category_id: Option<Uuid>,
    /// Attached tags (duplicates are ignored).
    pub tag_ids: Vec<Uuid>,
    /// Whether the answer is a code snippet.
    pub is_code_snippet: bool,
    /// Effective public flag.
    pub is_public: bool,
}

/// Replacement values for an existing flashcard.
///
/// Owner and review schedule are not part of an update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateFlashcard {
    /// Prompt side.
    pub question: String,
    /// Answer side.
    pub answer: String,
    /// Optional category.
    pub category_id: Option<Uuid>,
    /// Attached tags, replacing the current set.
    pub tag_ids: Vec<Uuid>,
    /// Whether the answer is a code snippet.
    pub is_code_snippet: bool,
    /// Effective public flag.
    pub is_public: bool,
}
