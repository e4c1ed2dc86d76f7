//! Core type definitions used across the Flashdeck workspace.

pub mod visibility;

pub use visibility::VisibilityScope;
