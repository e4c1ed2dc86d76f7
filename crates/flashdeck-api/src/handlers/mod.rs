//! HTTP request handlers.

pub mod auth;
pub mod category;
pub mod flashcard;
pub mod health;
pub mod tag;
