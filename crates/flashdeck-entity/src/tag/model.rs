//! Tag entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::ownership::OwnedResource;

/// A label that can be attached to any number of flashcards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Tag {
    /// Unique tag identifier.
    pub id: Uuid,
    /// The owning user.
    pub owner_id: Uuid,
    /// Tag name, unique per owner.
    pub name: String,
    /// Whether every user can see this tag.
    pub is_public: bool,
}

impl OwnedResource for Tag {
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    fn is_public(&self) -> bool {
        self.is_public
    }
}

/// Data required to create a new tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTag {
    /// The owning user.
    pub owner_id: Uuid,
    /// Tag name.
    pub name: String,
    /// Effective public flag.
    pub is_public: bool,
}

/// Replacement values for an existing tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTag {
    /// Tag name.
    pub name: String,
    /// Effective public flag.
    pub is_public: bool,
}
