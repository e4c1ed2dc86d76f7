//! # flashdeck-database
//!
//! Persistence for Flashdeck. The store traits in [`store`] are the only
//! seam the service layer sees; [`repositories`] implements them over
//! PostgreSQL and [`memory`] implements them in process.
//!
//! Every list operation takes a [`VisibilityScope`](flashdeck_core::types::VisibilityScope)
//! so the read rule is pushed down into the query instead of being applied
//! after loading rows.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{CategoryStore, FlashcardStore, Stores, TagStore, UserStore};
