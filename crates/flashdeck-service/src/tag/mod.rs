//! Tag use cases.

pub mod service;

pub use service::{TagInput, TagService};
