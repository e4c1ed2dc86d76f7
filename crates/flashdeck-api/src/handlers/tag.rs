//! Tag CRUD handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use flashdeck_entity::tag::Tag;

use crate::dto::request::TagRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ResourceId, ValidatedJson};
use crate::state::AppState;

/// GET /api/tags
pub async fn list_tags(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Tag>>>, ApiError> {
    let tags = state.tag_service.list(&auth).await?;
    Ok(Json(ApiResponse::ok(tags)))
}

/// POST /api/tags
pub async fn create_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<TagRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Tag>>), ApiError> {
    let tag = state.tag_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(tag))))
}

/// GET /api/tags/{id}
pub async fn get_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    ResourceId(id): ResourceId,
) -> Result<Json<ApiResponse<Tag>>, ApiError> {
    let tag = state.tag_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(tag)))
}

/// PUT /api/tags/{id}
pub async fn update_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    ResourceId(id): ResourceId,
    ValidatedJson(req): ValidatedJson<TagRequest>,
) -> Result<Json<ApiResponse<Tag>>, ApiError> {
    let tag = state.tag_service.update(&auth, id, req.into()).await?;
    Ok(Json(ApiResponse::ok(tag)))
}

/// DELETE /api/tags/{id}
pub async fn delete_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    ResourceId(id): ResourceId,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.tag_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Tag deleted"))))
}
