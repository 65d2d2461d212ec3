//! Event handlers.
//!
//! Creation accepts the multipart form submitted by the admin UI; field
//! names (titre, lieu, affiche, fiche) are part of the public contract.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use chrono::NaiveDate;

use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::{Category, EventResponse, NewEvent};
use crate::errors::{AppError, AppResult};
use crate::types::MessageResponse;

/// List all events, most recently created first
#[utoipa::path(
    get,
    path = "/events",
    tag = "Events",
    responses(
        (status = 200, description = "All events, newest first", body = [EventResponse])
    )
)]
pub async fn list_events(State(state): State<AppState>) -> AppResult<Json<Vec<EventResponse>>> {
    let events = state.event_service.list_events().await?;
    Ok(Json(events.into_iter().map(EventResponse::from).collect()))
}

/// Create an event from the admin multipart form
#[utoipa::path(
    post,
    path = "/events",
    tag = "Events",
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Event created", body = EventResponse),
        (status = 400, description = "Missing or invalid form fields"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin rights required")
    ),
    security(("session_cookie" = []))
)]
pub async fn create_event(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<EventResponse>)> {
    require_admin(&user)?;

    let new_event = parse_event_form(&state, multipart).await?;
    let event = state.event_service.create_event(new_event).await?;

    Ok((StatusCode::CREATED, Json(EventResponse::from(event))))
}

/// Delete an event by id
#[utoipa::path(
    delete,
    path = "/events/{id}",
    tag = "Events",
    params(
        ("id" = i64, Path, description = "Event identifier")
    ),
    responses(
        (status = 200, description = "Event deleted", body = MessageResponse),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin rights required"),
        (status = 404, description = "No such event")
    ),
    security(("session_cookie" = []))
)]
pub async fn delete_event(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    require_admin(&user)?;

    state.event_service.delete_event(id).await?;
    Ok(Json(MessageResponse::new("Event deleted")))
}

/// Collected text fields of the event form, before validation
#[derive(Default)]
struct EventForm {
    titre: Option<String>,
    date: Option<String>,
    lieu: Option<String>,
    categorie: Option<String>,
    description: Option<String>,
    adresse: Option<String>,
    lat: Option<String>,
    lng: Option<String>,
    affiche: Option<String>,
    fiche: Option<String>,
}

/// Drain the multipart stream into a `NewEvent`, storing file fields as
/// they arrive.
async fn parse_event_form(state: &AppState, mut multipart: Multipart) -> AppResult<NewEvent> {
    let mut form = EventForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(format!("Malformed multipart body: {}", e)))?
    {
        let name = match field.name() {
            Some(name) => name.to_string(),
            None => continue,
        };

        match name.as_str() {
            "affiche" | "fiche" => {
                let original_name = field.file_name().map(|f| f.to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::bad_request(format!("Failed to read {}: {}", name, e)))?;

                // An empty file input still submits a zero-byte part
                if bytes.is_empty() {
                    continue;
                }

                let stored = state.uploads.save(original_name.as_deref(), &bytes).await?;
                match name.as_str() {
                    "affiche" => form.affiche = Some(stored),
                    _ => form.fiche = Some(stored),
                }
            }
            _ => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::bad_request(format!("Failed to read {}: {}", name, e)))?;

                let value = Some(value).filter(|v| !v.is_empty());
                match name.as_str() {
                    "titre" => form.titre = value,
                    "date" => form.date = value,
                    "lieu" => form.lieu = value,
                    "categorie" => form.categorie = value,
                    "description" => form.description = value,
                    "adresse" => form.adresse = value,
                    "lat" => form.lat = value,
                    "lng" => form.lng = value,
                    _ => {}
                }
            }
        }
    }

    let titre = form
        .titre
        .ok_or_else(|| AppError::validation("titre is required"))?;

    let date = form
        .date
        .ok_or_else(|| AppError::validation("date is required"))?;
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| AppError::validation("date must be formatted as YYYY-MM-DD"))?;

    // Absent category falls back to the default grouping
    let categorie = Category::from(form.categorie.as_deref().unwrap_or_default());

    Ok(NewEvent {
        titre,
        date,
        lieu: form.lieu,
        categorie,
        description: form.description,
        adresse: form.adresse.unwrap_or_default(),
        lat: form.lat,
        lng: form.lng,
        affiche: form.affiche,
        fiche: form.fiche,
    })
}
