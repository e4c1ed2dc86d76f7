//! Flashcard CRUD handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use flashdeck_entity::flashcard::FlashcardDetail;

use crate::dto::request::FlashcardRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, FlashcardQuery, ResourceId, ValidatedJson};
use crate::state::AppState;

/// GET /api/flashcards?category_id=&tag_ids=&is_code_snippet=&search=
pub async fn list_flashcards(
    State(state): State<AppState>,
    auth: AuthUser,
    FlashcardQuery(filter): FlashcardQuery,
) -> Result<Json<ApiResponse<Vec<FlashcardDetail>>>, ApiError> {
    let cards = state.flashcard_service.list(&auth, &filter).await?;
    Ok(Json(ApiResponse::ok(cards)))
}

/// POST /api/flashcards
pub async fn create_flashcard(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<FlashcardRequest>,
) -> Result<(StatusCode, Json<ApiResponse<FlashcardDetail>>), ApiError> {
    let card = state.flashcard_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(card))))
}

/// GET /api/flashcards/{id}
pub async fn get_flashcard(
    State(state): State<AppState>,
    auth: AuthUser,
    ResourceId(id): ResourceId,
) -> Result<Json<ApiResponse<FlashcardDetail>>, ApiError> {
    let card = state.flashcard_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(card)))
}

/// PUT /api/flashcards/{id}
pub async fn update_flashcard(
    State(state): State<AppState>,
    auth: AuthUser,
    ResourceId(id): ResourceId,
    ValidatedJson(req): ValidatedJson<FlashcardRequest>,
) -> Result<Json<ApiResponse<FlashcardDetail>>, ApiError> {
    let card = state.flashcard_service.update(&auth, id, req.into()).await?;
    Ok(Json(ApiResponse::ok(card)))
}

/// DELETE /api/flashcards/{id}
pub async fn delete_flashcard(
    State(state): State<AppState>,
    auth: AuthUser,
    ResourceId(id): ResourceId,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.flashcard_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Flashcard deleted"))))
}
