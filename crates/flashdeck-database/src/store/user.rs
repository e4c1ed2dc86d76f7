//! User store trait.

use async_trait::async_trait;
use uuid::Uuid;

use flashdeck_core::result::AppResult;
use flashdeck_entity::user::{CreateUser, User, UserRole};

/// Persistence of user accounts.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by username (case-insensitive).
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// All users, oldest first.
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Insert a user. Fails with a conflict when the username is taken.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Change a user's role.
    async fn update_role(&self, id: Uuid, role: UserRole) -> AppResult<User>;

    /// Stamp a successful login.
    async fn touch_last_login(&self, id: Uuid) -> AppResult<()>;

    /// Delete a user together with every category, tag and flashcard it owns.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}
