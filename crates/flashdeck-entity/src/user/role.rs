//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two privilege tiers of Flashdeck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Sees every record and may publish content.
    Superuser,
    /// Sees own and public records; everything it creates is private.
    Member,
}

impl UserRole {
    /// Whether this role carries elevated privileges.
    pub fn is_elevated(&self) -> bool {
        matches!(self, Self::Superuser)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Superuser => "superuser",
            Self::Member => "member",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = flashdeck_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "superuser" => Ok(Self::Superuser),
            "member" => Ok(Self::Member),
            _ => Err(flashdeck_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: superuser, member"
            ))),
        }
    }
}
