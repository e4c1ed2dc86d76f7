//! The acting identity behind a request.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::UserRole;

/// Who is performing an operation, as far as the policy core cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The authenticated user.
    pub user_id: Uuid,
    /// The user's current role.
    pub role: UserRole,
}

impl Actor {
    /// Creates an actor.
    pub fn new(user_id: Uuid, role: UserRole) -> Self {
        Self { user_id, role }
    }

    /// A regular (non-elevated) actor.
    pub fn member(user_id: Uuid) -> Self {
        Self::new(user_id, UserRole::Member)
    }

    /// An elevated actor.
    pub fn superuser(user_id: Uuid) -> Self {
        Self::new(user_id, UserRole::Superuser)
    }

    /// Whether the actor holds superuser privileges.
    pub fn is_elevated(&self) -> bool {
        self.role.is_elevated()
    }
}
