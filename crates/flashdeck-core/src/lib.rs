//! # flashdeck-core
//!
//! Core crate for Flashdeck. Contains configuration schemas, the
//! visibility scope shared by the policy and the stores, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other Flashdeck crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
