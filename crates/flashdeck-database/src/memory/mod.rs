//! In-process implementation of every store trait.
//!
//! Used by the test suites and by `flashdeck serve --in-memory`.

pub mod store;

pub use store::MemoryStore;
