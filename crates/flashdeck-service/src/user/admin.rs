//! Operator-level account management used by the CLI.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use flashdeck_auth::password::{PasswordHasher, PasswordValidator};
use flashdeck_core::error::AppError;
use flashdeck_database::store::UserStore;
use flashdeck_entity::user::{CreateUser, User, UserRole};

/// Account administration without an acting user.
#[derive(Debug, Clone)]
pub struct AdminUserService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
}

impl AdminUserService {
    /// Creates a new admin user service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            users,
            hasher,
            validator,
        }
    }

    /// Creates an account with an explicit role.
    pub async fn create_user(
        &self,
        username: &str,
        email: Option<String>,
        password: &str,
        role: UserRole,
    ) -> Result<User, AppError> {
        self.validator.validate(password, &[username])?;

        let user = self
            .users
            .create(&CreateUser {
                username: username.trim().to_string(),
                email,
                password_hash: self.hasher.hash_password(password)?,
                role,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, role = %user.role, "User created");
        Ok(user)
    }

    /// Every account.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.users.list().await
    }

    /// Changes the role of the named account.
    pub async fn set_role(&self, username: &str, role: UserRole) -> Result<User, AppError> {
        let user = self.find(username).await?;
        let user = self.users.update_role(user.id, role).await?;
        info!(user_id = %user.id, role = %role, "User role changed");
        Ok(user)
    }

    /// Deletes the named account and everything it owns.
    pub async fn delete_user(&self, username: &str) -> Result<Uuid, AppError> {
        let user = self.find(username).await?;
        self.users.delete(user.id).await?;
        info!(user_id = %user.id, username = %user.username, "User deleted");
        Ok(user.id)
    }

    async fn find(&self, username: &str) -> Result<User, AppError> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User '{username}' not found")))
    }
}
