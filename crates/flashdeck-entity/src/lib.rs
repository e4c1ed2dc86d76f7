//! # flashdeck-entity
//!
//! Domain entity models for Flashdeck. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities derive `sqlx::FromRow`.

pub mod category;
pub mod flashcard;
pub mod ownership;
pub mod tag;
pub mod user;

pub use ownership::OwnedResource;
