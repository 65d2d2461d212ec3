//! Chat handler.

use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::errors::AppResult;

/// Chat request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChatRequest {
    /// Visitor question about the listed events
    #[validate(length(min = 1, message = "Message is required"))]
    #[schema(example = "Quand a lieu le forum des entreprises ?")]
    pub message: String,
}

/// Chat response
#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    /// Assistant answer, from the language model or the local fallback
    pub response: String,
}

/// Answer a question about the listed events.
///
/// Upstream failures degrade to a local keyword match, so this endpoint
/// answers 200 even when the language-model API is unreachable.
#[utoipa::path(
    post,
    path = "/chat",
    tag = "Chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant answer", body = ChatResponse),
        (status = 400, description = "Validation error")
    )
)]
pub async fn chat(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let response = state.chat_service.answer(&payload.message).await?;
    Ok(Json(ChatResponse { response }))
}
