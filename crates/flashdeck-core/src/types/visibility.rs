//! Read-visibility scope pushed down into store queries.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which records an actor may read.
///
/// Produced by the visibility policy and consumed by every store so that
/// SQL queries and in-memory scans apply the same rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VisibilityScope {
    /// Every record, regardless of owner or public flag.
    All,
    /// Records owned by `owner_id`, plus every public record.
    OwnedOrPublic {
        /// The acting user.
        owner_id: Uuid,
    },
}

impl VisibilityScope {
    /// Returns whether a record with the given owner and public flag is in scope.
    pub fn admits(&self, owner_id: Uuid, is_public: bool) -> bool {
        match self {
            Self::All => true,
            Self::OwnedOrPublic { owner_id: actor } => is_public || *actor == owner_id,
        }
    }

    /// The owner restriction for SQL binding, `None` when unrestricted.
    pub fn restricted_to(&self) -> Option<Uuid> {
        match self {
            Self::All => None,
            Self::OwnedOrPublic { owner_id } => Some(*owner_id),
        }
    }
}
