//! Participation handlers.

use axum::{extract::State, response::Json, Extension};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::types::MessageResponse;

/// Participation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ParticipateRequest {
    /// Identifier of the event to participate in
    #[serde(rename = "eventId")]
    #[schema(example = 1717171717171i64)]
    pub event_id: i64,
}

/// Register the session user's participation in an event
#[utoipa::path(
    post,
    path = "/participate",
    tag = "Participation",
    request_body = ParticipateRequest,
    responses(
        (status = 200, description = "Participation registered", body = MessageResponse),
        (status = 400, description = "Already participating in this event"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "No such event")
    ),
    security(("session_cookie" = []))
)]
pub async fn participate(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<ParticipateRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .participation_service
        .participate(user.email, payload.event_id)
        .await?;

    Ok(Json(MessageResponse::new("Participation registered")))
}
