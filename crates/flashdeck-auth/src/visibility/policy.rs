//! Read and write rules shared by categories, tags and flashcards.
//!
//! An elevated actor sees every record; anyone else sees records they own
//! plus public ones. On write, only elevated actors may set the public flag.
//! Every decision here is synchronous and works on already-loaded data.

use tracing::debug;

use flashdeck_core::error::AppError;
use flashdeck_core::types::VisibilityScope;
use flashdeck_entity::OwnedResource;
use flashdeck_entity::user::Actor;

/// Stateless decisions about who may see, publish and modify a record.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisibilityPolicy;

impl VisibilityPolicy {
    /// Creates the policy.
    pub fn new() -> Self {
        Self
    }

    /// The read scope for `actor`, for pushing into store queries.
    pub fn scope(&self, actor: &Actor) -> VisibilityScope {
        if actor.is_elevated() {
            VisibilityScope::All
        } else {
            VisibilityScope::OwnedOrPublic {
                owner_id: actor.user_id,
            }
        }
    }

    /// Whether `actor` may see `record`.
    pub fn can_view<R: OwnedResource>(&self, actor: &Actor, record: &R) -> bool {
        self.scope(actor)
            .admits(record.owner_id(), record.is_public())
    }

    /// The subset of `records` visible to `actor`, order preserved.
    pub fn visible_set<R: OwnedResource>(&self, actor: &Actor, records: Vec<R>) -> Vec<R> {
        let scope = self.scope(actor);
        records
            .into_iter()
            .filter(|r| scope.admits(r.owner_id(), r.is_public()))
            .collect()
    }

    /// The public flag that will actually be stored for a write by `actor`.
    ///
    /// Non-elevated actors are silently downgraded to private.
    pub fn resolve_public_flag(&self, actor: &Actor, requested: Option<bool>) -> bool {
        let requested = requested.unwrap_or(false);
        if requested && !actor.is_elevated() {
            debug!(user_id = %actor.user_id, "Public flag downgraded to private");
            return false;
        }
        requested
    }

    /// The public flag stored when `actor` updates a record whose flag is
    /// currently `current`.
    ///
    /// An absent request keeps `current`. Non-elevated actors may keep a
    /// record public or make it private, but never publish it.
    pub fn resolve_updated_public_flag(
        &self,
        actor: &Actor,
        requested: Option<bool>,
        current: bool,
    ) -> bool {
        let requested = requested.unwrap_or(current);
        if requested && !current && !actor.is_elevated() {
            debug!(user_id = %actor.user_id, "Public flag downgraded to private");
            return false;
        }
        requested
    }

    /// Returns `record` when visible, otherwise a not-found error that does
    /// not reveal whether the record exists.
    pub fn require_visible<R: OwnedResource>(
        &self,
        actor: &Actor,
        record: Option<R>,
        what: &str,
    ) -> Result<R, AppError> {
        match record {
            Some(r) if self.can_view(actor, &r) => Ok(r),
            _ => Err(AppError::not_found(format!("{what} not found"))),
        }
    }

    /// Fails unless `actor` owns `record` or is elevated.
    pub fn require_mutable<R: OwnedResource>(
        &self,
        actor: &Actor,
        record: &R,
        what: &str,
    ) -> Result<(), AppError> {
        if actor.is_elevated() || record.owner_id() == actor.user_id {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Only the owner may modify this {}",
                what.to_lowercase()
            )))
        }
    }
}
