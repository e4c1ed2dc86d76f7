//! Ownership and public-flag access shared by all user content.

use uuid::Uuid;

/// A record that belongs to one user and may be published to everyone.
pub trait OwnedResource {
    /// The owning user.
    fn owner_id(&self) -> Uuid;

    /// Whether the record is visible to every actor.
    fn is_public(&self) -> bool;
}

impl<T: OwnedResource + ?Sized> OwnedResource for &T {
    fn owner_id(&self) -> Uuid {
        (**self).owner_id()
    }

    fn is_public(&self) -> bool {
        (**self).is_public()
    }
}
