//! Authentication handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::SESSION_COOKIE;
use crate::domain::UserResponse;
use crate::errors::AppResult;
use crate::types::MessageResponse;

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    /// Display name
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "yacine")]
    pub username: String,
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "yacine@enit.tn")]
    pub email: String,
    /// User password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
}

/// User signin request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SigninRequest {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "yacine@enit.tn")]
    pub email: String,
    /// User password
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Signin response
#[derive(Debug, Serialize, ToSchema)]
pub struct SigninResponse {
    /// Display name of the signed-in user
    #[schema(example = "yacine")]
    pub username: String,
    /// Whether the email belongs to the admin allow-list
    pub is_admin: bool,
}

/// Current session response
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    /// Whether a valid session cookie accompanied the request
    pub logged_in: bool,
    /// Display name, present when logged in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Whether the session email belongs to the admin allow-list
    pub is_admin: bool,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/signup",
    tag = "Authentication",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email or username already taken")
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state
        .auth_service
        .signup(payload.username, payload.email, payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Sign in and establish a session cookie
#[utoipa::path(
    post,
    path = "/signin",
    tag = "Authentication",
    request_body = SigninRequest,
    responses(
        (status = 200, description = "Signed in", body = SigninResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn signin(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(payload): ValidatedJson<SigninRequest>,
) -> AppResult<(CookieJar, Json<SigninResponse>)> {
    let outcome = state
        .auth_service
        .signin(payload.email, payload.password)
        .await?;

    let cookie = Cookie::build((SESSION_COOKIE, outcome.token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(outcome.max_age_seconds))
        .build();

    Ok((
        jar.add(cookie),
        Json(SigninResponse {
            username: outcome.username,
            is_admin: outcome.is_admin,
        }),
    ))
}

/// Destroy the session by removing its cookie
#[utoipa::path(
    post,
    path = "/logout",
    tag = "Authentication",
    responses(
        (status = 200, description = "Signed out", body = MessageResponse)
    )
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    let mut cookie = Cookie::from(SESSION_COOKIE);
    cookie.set_path("/");

    (
        jar.remove(cookie),
        Json(MessageResponse::new("Signed out")),
    )
}

/// Report the current session, if any.
///
/// Always answers 200; an absent or invalid cookie simply yields
/// `logged_in: false`.
#[utoipa::path(
    get,
    path = "/me",
    tag = "Authentication",
    responses(
        (status = 200, description = "Current session state", body = SessionResponse)
    )
)]
pub async fn me(State(state): State<AppState>, jar: CookieJar) -> Json<SessionResponse> {
    let session = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| state.auth_service.verify_token(cookie.value()).ok());

    let response = match session {
        Some(claims) => SessionResponse {
            logged_in: true,
            is_admin: state.auth_service.is_admin(&claims.email),
            username: Some(claims.username),
        },
        None => SessionResponse {
            logged_in: false,
            username: None,
            is_admin: false,
        },
    };

    Json(response)
}
