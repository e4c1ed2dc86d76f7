//! Registration, login, logout and token authentication.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use flashdeck_auth::jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder};
use flashdeck_auth::password::{PasswordHasher, PasswordValidator};
use flashdeck_core::error::AppError;
use flashdeck_database::store::UserStore;
use flashdeck_entity::user::{CreateUser, User, UserRole};

use crate::context::RequestContext;

/// A successful login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    /// The bearer token.
    #[serde(flatten)]
    pub token: IssuedToken,
    /// The logged-in user.
    pub user: User,
}

/// Handles the account lifecycle of the calling user.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
    ) -> Self {
        Self {
            users,
            hasher,
            validator,
            encoder,
            decoder,
        }
    }

    /// Registers a regular member account.
    pub async fn register(
        &self,
        username: &str,
        email: Option<String>,
        password: &str,
    ) -> Result<User, AppError> {
        let username = username.trim();
        let mut inputs = vec![username];
        if let Some(email) = email.as_deref() {
            inputs.push(email);
        }
        self.validator.validate(password, &inputs)?;

        let user = self
            .users
            .create(&CreateUser {
                username: username.to_string(),
                email,
                password_hash: self.hasher.hash_password(password)?,
                role: UserRole::Member,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Exchanges credentials for a bearer token.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AppError> {
        let user = self.users.find_by_username(username.trim()).await?;

        let user = match user {
            Some(u) if self.hasher.verify_password(password, &u.password_hash)? => u,
            _ => {
                warn!(username = %username, "Login failed");
                return Err(AppError::authentication("Invalid username or password"));
            }
        };

        self.users.touch_last_login(user.id).await?;
        let token = self.encoder.issue(&user)?;

        info!(user_id = %user.id, "User logged in");
        Ok(LoginOutcome { token, user })
    }

    /// Resolves a bearer token to the current state of its user.
    ///
    /// The user is re-read on every call so deletions and role changes
    /// take effect before the token expires.
    pub async fn authenticate(&self, token: &str) -> Result<(RequestContext, Claims), AppError> {
        let claims = self.decoder.decode(token)?;

        let user = self
            .users
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::authentication("User no longer exists"))?;

        Ok((RequestContext::for_user(&user), claims))
    }

    /// The caller's own account.
    pub async fn me(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Revokes the token the caller authenticated with.
    pub async fn logout(&self, ctx: &RequestContext, claims: &Claims) -> Result<(), AppError> {
        self.decoder.revoke(claims).await;
        info!(user_id = %ctx.user_id, "User logged out");
        Ok(())
    }
}
