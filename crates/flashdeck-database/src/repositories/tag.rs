//! Tag repository.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use flashdeck_core::error::AppError;
use flashdeck_core::result::AppResult;
use flashdeck_core::types::VisibilityScope;
use flashdeck_entity::tag::{CreateTag, Tag, UpdateTag};

use super::{db_error, map_unique, push_visibility};
use crate::store::TagStore;

const UNIQUE_NAME: &str = "tags_owner_name_key";

/// PostgreSQL tags.
#[derive(Debug, Clone)]
pub struct TagRepository {
    pool: PgPool,
}

impl TagRepository {
    /// Create a new tag repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagStore for TagRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Tag>> {
        sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find tag"))
    }

    async fn find_many(&self, ids: &[Uuid]) -> AppResult<Vec<Tag>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE id = ANY($1) ORDER BY name ASC")
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to find tags"))
    }

    async fn list(&self, scope: VisibilityScope) -> AppResult<Vec<Tag>> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT t.* FROM tags t WHERE TRUE");
        push_visibility(&mut qb, scope, "t");
        qb.push(" ORDER BY t.name ASC, t.id ASC");

        qb.build_query_as::<Tag>()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list tags"))
    }

    async fn create(&self, data: &CreateTag) -> AppResult<Tag> {
        sqlx::query_as::<_, Tag>(
            "INSERT INTO tags (id, owner_id, name, is_public) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(data.owner_id)
        .bind(&data.name)
        .bind(data.is_public)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_unique(
                e,
                UNIQUE_NAME,
                format!("Tag '{}' already exists", data.name),
                "Failed to create tag",
            )
        })
    }

    async fn update(&self, id: Uuid, data: &UpdateTag) -> AppResult<Tag> {
        sqlx::query_as::<_, Tag>(
            "UPDATE tags SET name = $2, is_public = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(data.is_public)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_unique(
                e,
                UNIQUE_NAME,
                format!("Tag '{}' already exists", data.name),
                "Failed to update tag",
            )
        })?
        .ok_or_else(|| AppError::not_found(format!("Tag {id} not found")))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        sqlx::query("DELETE FROM flashcard_tags WHERE tag_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to detach tag"))?;

        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to delete tag"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit tag deletion"))?;

        Ok(result.rows_affected() > 0)
    }
}
