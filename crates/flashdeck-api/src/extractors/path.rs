//! Typed path parameter helpers.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use uuid::Uuid;

use flashdeck_core::error::AppError;

use crate::error::ApiError;

/// Parses a UUID from a path segment.
///
/// A malformed id cannot name any record, so it reads as not found.
pub fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(s).map_err(|_| AppError::not_found(format!("No record with id '{s}'")))
}

/// The `{id}` segment of a resource route.
#[derive(Debug, Clone, Copy)]
pub struct ResourceId(pub Uuid);

impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::not_found(e.body_text()))?;
        Ok(Self(parse_uuid(&raw)?))
    }
}
