//! Spaced-repetition state carried by every flashcard.
//!
//! No scheduler updates these values; they are set once at creation and
//! preserved by every later write.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Initial ease factor of a new card.
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Snapshot of the review schedule fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewState {
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
}

impl Default for ReviewState {
    fn default() -> Self {
        Self {
            ease_factor: DEFAULT_EASE_FACTOR,
            repetitions: 0,
            interval_days: 0,
            last_reviewed_at: None,
            next_review_date: None,
        }
    }
}
