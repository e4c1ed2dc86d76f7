//! Category domain entities.

pub mod model;
pub mod tree;

pub use model::{Category, CreateCategory, UpdateCategory};
pub use tree::descendant_ids;
