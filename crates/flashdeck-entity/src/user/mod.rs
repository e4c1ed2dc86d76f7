//! User domain entities.

pub mod actor;
pub mod model;
pub mod role;

pub use actor::Actor;
pub use model::{CreateUser, User};
pub use role::UserRole;
