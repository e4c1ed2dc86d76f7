//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use flashdeck_entity::user::{Actor, User, UserRole};

/// Context for the current authenticated request.
///
/// Built by the auth extractor from the freshly loaded user and passed into
/// every service call so each operation knows who is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's current role.
    pub role: UserRole,
    /// The username.
    pub username: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, role: UserRole, username: String) -> Self {
        Self {
            user_id,
            role,
            username,
            request_time: Utc::now(),
        }
    }

    /// Context for an already loaded user.
    pub fn for_user(user: &User) -> Self {
        Self::new(user.id, user.role, user.username.clone())
    }

    /// The acting identity handed to the visibility policy.
    pub fn actor(&self) -> Actor {
        Actor::new(self.user_id, self.role)
    }

    /// Returns whether the current user is a superuser.
    pub fn is_superuser(&self) -> bool {
        self.role.is_elevated()
    }
}
