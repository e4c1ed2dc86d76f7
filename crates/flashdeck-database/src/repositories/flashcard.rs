//! Flashcard repository.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use flashdeck_core::error::AppError;
use flashdeck_core::result::AppResult;
use flashdeck_core::types::VisibilityScope;
use flashdeck_entity::flashcard::{
    CreateFlashcard, Flashcard, FlashcardDetail, FlashcardFilter, ReviewState, UpdateFlashcard,
};

use super::{db_error, push_visibility};
use crate::store::FlashcardStore;

/// PostgreSQL flashcards and `flashcard_tags` links.
#[derive(Debug, Clone)]
pub struct FlashcardRepository {
    pool: PgPool,
}

impl FlashcardRepository {
    /// Create a new flashcard repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Tag ids per flashcard for every id in `card_ids`.
    async fn tag_links(&self, card_ids: &[Uuid]) -> AppResult<HashMap<Uuid, Vec<Uuid>>> {
        let rows: Vec<(Uuid, Uuid)> = sqlx::query_as(
            "SELECT flashcard_id, tag_id FROM flashcard_tags \
             WHERE flashcard_id = ANY($1) ORDER BY tag_id ASC",
        )
        .bind(card_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to load flashcard tags"))?;

        let mut links: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for (card_id, tag_id) in rows {
            links.entry(card_id).or_default().push(tag_id);
        }
        Ok(links)
    }

    async fn attach(&self, cards: Vec<Flashcard>) -> AppResult<Vec<FlashcardDetail>> {
        if cards.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = cards.iter().map(|c| c.id).collect();
        let mut links = self.tag_links(&ids).await?;
        Ok(cards
            .into_iter()
            .map(|flashcard| FlashcardDetail {
                tag_ids: links.remove(&flashcard.id).unwrap_or_default(),
                flashcard,
            })
            .collect())
    }
}

/// Replace the tag links of one card inside an open transaction.
async fn replace_links(conn: &mut PgConnection, card_id: Uuid, tag_ids: &[Uuid]) -> AppResult<()> {
    sqlx::query("DELETE FROM flashcard_tags WHERE flashcard_id = $1")
        .bind(card_id)
        .execute(&mut *conn)
        .await
        .map_err(db_error("Failed to clear flashcard tags"))?;

    if tag_ids.is_empty() {
        return Ok(());
    }

    sqlx::query(
        "INSERT INTO flashcard_tags (flashcard_id, tag_id) \
         SELECT $1, t FROM UNNEST($2::uuid[]) AS t ON CONFLICT DO NOTHING",
    )
    .bind(card_id)
    .bind(tag_ids)
    .execute(&mut *conn)
    .await
    .map_err(db_error("Failed to link flashcard tags"))?;
    Ok(())
}

/// `%term%` with LIKE metacharacters escaped.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait]
impl FlashcardStore for FlashcardRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<FlashcardDetail>> {
        let card = sqlx::query_as::<_, Flashcard>("SELECT * FROM flashcards WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find flashcard"))?;

        match card {
            Some(card) => Ok(self.attach(vec![card]).await?.into_iter().next()),
            None => Ok(None),
        }
    }

    async fn list(
        &self,
        scope: VisibilityScope,
        filter: &FlashcardFilter,
    ) -> AppResult<Vec<FlashcardDetail>> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT f.* FROM flashcards f WHERE TRUE");
        push_visibility(&mut qb, scope, "f");

        if let Some(category_id) = filter.category_id {
            qb.push(" AND f.category_id = ").push_bind(category_id);
        }
        if let Some(flag) = filter.is_code_snippet {
            qb.push(" AND f.is_code_snippet = ").push_bind(flag);
        }
        if let Some(tag_ids) = &filter.tag_ids {
            qb.push(
                " AND EXISTS (SELECT 1 FROM flashcard_tags ft \
                 WHERE ft.flashcard_id = f.id AND ft.tag_id = ANY(",
            )
            .push_bind(tag_ids.clone())
            .push("))");
        }
        for term in filter.search_terms() {
            let pattern = like_pattern(&term);
            qb.push(" AND (f.question ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR f.answer ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        qb.push(" ORDER BY f.created_at ASC, f.id ASC");

        let cards = qb
            .build_query_as::<Flashcard>()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list flashcards"))?;

        self.attach(cards).await
    }

    async fn count_public_in_category(&self, category_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM flashcards WHERE category_id = $1 AND is_public",
        )
        .bind(category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to count public flashcards in category"))
    }

    async fn count_public_with_tag(&self, tag_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM flashcards f \
             JOIN flashcard_tags ft ON ft.flashcard_id = f.id \
             WHERE ft.tag_id = $1 AND f.is_public",
        )
        .bind(tag_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to count public flashcards with tag"))
    }

    async fn create(&self, data: &CreateFlashcard) -> AppResult<FlashcardDetail> {
        let review = ReviewState::default();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let card = sqlx::query_as::<_, Flashcard>(
            "INSERT INTO flashcards (id, owner_id, question, answer, category_id, \
             is_code_snippet, is_public, ease_factor, repetitions, interval_days, \
             last_reviewed_at, next_review_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(data.owner_id)
        .bind(&data.question)
        .bind(&data.answer)
        .bind(data.category_id)
        .bind(data.is_code_snippet)
        .bind(data.is_public)
        .bind(review.ease_factor)
        .bind(review.repetitions)
        .bind(review.interval_days)
        .bind(review.last_reviewed_at)
        .bind(review.next_review_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("Failed to create flashcard"))?;

        replace_links(&mut tx, card.id, &data.tag_ids).await?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit flashcard"))?;

        self.find_by_id(card.id)
            .await?
            .ok_or_else(|| AppError::internal("Flashcard vanished after insert"))
    }

    async fn update(&self, id: Uuid, data: &UpdateFlashcard) -> AppResult<FlashcardDetail> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let updated = sqlx::query(
            "UPDATE flashcards SET question = $2, answer = $3, category_id = $4, \
             is_code_snippet = $5, is_public = $6, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(&data.question)
        .bind(&data.answer)
        .bind(data.category_id)
        .bind(data.is_code_snippet)
        .bind(data.is_public)
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to update flashcard"))?;

        if updated.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Flashcard {id} not found")));
        }

        replace_links(&mut tx, id, &data.tag_ids).await?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit flashcard update"))?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Flashcard {id} not found")))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM flashcards WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete flashcard"))?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("rust"), "%rust%");
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("snake_case"), "%snake\\_case%");
    }
}
