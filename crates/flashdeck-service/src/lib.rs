//! # flashdeck-service
//!
//! Use-case services for Flashdeck. Each service combines a store with the
//! visibility policy; the flashcard service additionally runs the
//! publication consistency check before every write.
//!
//! Services follow constructor injection: stores arrive as
//! `Arc<dyn ...Store>` so the same code runs over PostgreSQL and the
//! in-memory store.

pub mod category;
pub mod context;
pub mod field;
pub mod flashcard;
pub mod tag;
pub mod user;

pub use category::{CategoryInput, CategoryService};
pub use context::RequestContext;
pub use flashcard::{FlashcardInput, FlashcardService};
pub use tag::{TagInput, TagService};
pub use user::{AdminUserService, LoginOutcome, UserService};
