//! Category entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::ownership::OwnedResource;

/// A node in a user's category tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Category {
    /// Unique category identifier.
    pub id: Uuid,
    /// The owning user.
    pub owner_id: Uuid,
    /// Display name, unique per owner and parent.
    pub name: String,
    /// Optional abbreviation.
    pub short_name: Option<String>,
    /// Parent category (null for roots).
    pub parent_id: Option<Uuid>,
    /// Free-form description.
    pub description: Option<String>,
    /// Whether every user can see this category.
    pub is_public: bool,
}

impl Category {
    /// Check if this is a root category (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

impl OwnedResource for Category {
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    fn is_public(&self) -> bool {
        self.is_public
    }
}

/// Data required to create a new category.
///
/// `owner_id` and `is_public` are already resolved by the service layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategory {
    /// The owning user.
    pub owner_id: Uuid,
    /// Display name.
    pub name: String,
    /// Optional abbreviation.
    pub short_name: Option<String>,
    /// Parent category.
    pub parent_id: Option<Uuid>,
    /// Free-form description.
    pub description: Option<String>,
    /// Effective public flag.
    pub is_public: bool,
}

/// Replacement values for an existing category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCategory {
    /// Display name.
    pub name: String,
    /// Optional abbreviation.
    pub short_name: Option<String>,
    /// Parent category.
    pub parent_id: Option<Uuid>,
    /// Free-form description.
    pub description: Option<String>,
    /// Effective public flag.
    pub is_public: bool,
}
