//! Category repository.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;
use uuid::Uuid;

use flashdeck_core::error::AppError;
use flashdeck_core::result::AppResult;
use flashdeck_core::types::VisibilityScope;
use flashdeck_entity::category::{Category, CreateCategory, UpdateCategory};

use super::{db_error, map_unique, push_visibility};
use crate::store::CategoryStore;

const UNIQUE_SIBLING: &str = "categories_owner_name_parent_key";

/// PostgreSQL category tree.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    /// Create a new category repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryStore for CategoryRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Category>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find category"))
    }

    async fn list(&self, scope: VisibilityScope) -> AppResult<Vec<Category>> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT c.* FROM categories c WHERE TRUE");
        push_visibility(&mut qb, scope, "c");
        qb.push(" ORDER BY c.name ASC, c.id ASC");

        qb.build_query_as::<Category>()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list categories"))
    }

    async fn subtree_ids(&self, id: Uuid) -> AppResult<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            "WITH RECURSIVE tree AS ( \
                SELECT id, 0 AS depth FROM categories WHERE id = $1 \
                UNION \
                SELECT c.id, t.depth + 1 FROM categories c INNER JOIN tree t ON c.parent_id = t.id \
             ) SELECT id FROM tree ORDER BY depth ASC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list category subtree"))
    }

    async fn create(&self, data: &CreateCategory) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories \
             (id, owner_id, name, short_name, parent_id, description, is_public) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(data.owner_id)
        .bind(&data.name)
        .bind(&data.short_name)
        .bind(data.parent_id)
        .bind(&data.description)
        .bind(data.is_public)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_unique(
                e,
                UNIQUE_SIBLING,
                format!("Category '{}' already exists at this level", data.name),
                "Failed to create category",
            )
        })
    }

    async fn update(&self, id: Uuid, data: &UpdateCategory) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = $2, short_name = $3, parent_id = $4, \
             description = $5, is_public = $6 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.short_name)
        .bind(data.parent_id)
        .bind(&data.description)
        .bind(data.is_public)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_unique(
                e,
                UNIQUE_SIBLING,
                format!("Category '{}' already exists at this level", data.name),
                "Failed to update category",
            )
        })?
        .ok_or_else(|| AppError::not_found(format!("Category {id} not found")))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let ids = self.subtree_ids(id).await?;
        if ids.is_empty() {
            return Ok(false);
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let detached = sqlx::query(
            "UPDATE flashcards SET category_id = NULL WHERE category_id = ANY($1)",
        )
        .bind(&ids)
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to detach flashcards from categories"))?;

        let deleted = sqlx::query("DELETE FROM categories WHERE id = ANY($1)")
            .bind(&ids)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to delete categories"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit category deletion"))?;

        debug!(
            category_id = %id,
            categories = deleted.rows_affected(),
            flashcards_detached = detached.rows_affected(),
            "Deleted category subtree"
        );
        Ok(deleted.rows_affected() > 0)
    }
}
