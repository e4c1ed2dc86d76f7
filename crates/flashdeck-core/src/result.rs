//! Convenience result type alias for Flashdeck.

use crate::error::AppError;

/// A specialized `Result` type for Flashdeck operations.
pub type AppResult<T> = Result<T, AppError>;
