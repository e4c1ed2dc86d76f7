//! Category use cases.

pub mod service;

pub use service::{CategoryInput, CategoryService};
