//! Session authentication middleware.
//!
//! The session is a signed token carried in an http-only cookie; the
//! middleware verifies it and injects the resolved user into request
//! extensions. Admin status is computed from the allow-list on every
//! request, never persisted.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::api::AppState;
use crate::config::SESSION_COOKIE;
use crate::errors::AppError;

/// Authenticated user extracted from the session cookie
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
}

/// Session authentication middleware.
///
/// Extracts and validates the session token from the cookie,
/// then injects the CurrentUser into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(&token)?;
    let is_admin = state.auth_service.is_admin(&claims.email);

    let current_user = CurrentUser {
        id: claims.sub,
        username: claims.username,
        email: claims.email,
        is_admin,
    };

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// Require admin rights, returns Forbidden error if not admin.
pub fn require_admin(user: &CurrentUser) -> Result<(), AppError> {
    if user.is_admin {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
