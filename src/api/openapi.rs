//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, chat_handler, event_handler, participation_handler};
use crate::config::SESSION_COOKIE;
use crate::domain::{EventResponse, UserResponse};
use crate::types::MessageResponse;

/// OpenAPI documentation for the event platform API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "ENIT Events API",
        version = "0.1.0",
        description = "Event listing platform with session authentication, \
                       participation tracking and an event-aware chat assistant"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::signup,
        auth_handler::signin,
        auth_handler::logout,
        auth_handler::me,
        // Event endpoints
        event_handler::list_events,
        event_handler::create_event,
        event_handler::delete_event,
        // Participation
        participation_handler::participate,
        // Chat
        chat_handler::chat,
    ),
    components(
        schemas(
            // Domain types
            EventResponse,
            UserResponse,
            MessageResponse,
            // Request/response types
            auth_handler::SignupRequest,
            auth_handler::SigninRequest,
            auth_handler::SigninResponse,
            auth_handler::SessionResponse,
            participation_handler::ParticipateRequest,
            chat_handler::ChatRequest,
            chat_handler::ChatResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, sign-in and session state"),
        (name = "Events", description = "Event listing and administration"),
        (name = "Participation", description = "Event participation registration"),
        (name = "Chat", description = "Event-aware chat assistant")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for the session cookie
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
            );
        }
    }
}
