//! Category CRUD handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use flashdeck_entity::category::Category;

use crate::dto::request::CategoryRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ResourceId, ValidatedJson};
use crate::state::AppState;

/// GET /api/categories
pub async fn list_categories(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Category>>>, ApiError> {
    let categories = state.category_service.list(&auth).await?;
    Ok(Json(ApiResponse::ok(categories)))
}

/// POST /api/categories
pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CategoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Category>>), ApiError> {
    let category = state.category_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(category))))
}

/// GET /api/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ResourceId(id): ResourceId,
) -> Result<Json<ApiResponse<Category>>, ApiError> {
    let category = state.category_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(category)))
}

/// PUT /api/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ResourceId(id): ResourceId,
    ValidatedJson(req): ValidatedJson<CategoryRequest>,
) -> Result<Json<ApiResponse<Category>>, ApiError> {
    let category = state.category_service.update(&auth, id, req.into()).await?;
    Ok(Json(ApiResponse::ok(category)))
}

/// DELETE /api/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ResourceId(id): ResourceId,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.category_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Category deleted"))))
}
