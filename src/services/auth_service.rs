//! Authentication service - signup, signin, and session tokens.
//!
//! Sessions are signed JWTs carried in an http-only cookie. The token is
//! self-contained, so logout is cookie removal and expiry is the exp claim.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{Config, SECONDS_PER_HOUR};
use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Session token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: Uuid,
    pub username: String,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

/// Established session returned after successful signin
#[derive(Debug)]
pub struct SigninOutcome {
    /// Signed session token to place in the cookie
    pub token: String,
    /// Cookie lifetime in seconds
    pub max_age_seconds: i64,
    pub username: String,
    /// Computed from the admin allow-list, never stored
    pub is_admin: bool,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user
    async fn signup(&self, username: String, email: String, password: String) -> AppResult<User>;

    /// Sign in and establish a session
    async fn signin(&self, email: String, password: String) -> AppResult<SigninOutcome>;

    /// Verify a session token and extract its claims
    fn verify_token(&self, token: &str) -> AppResult<SessionClaims>;

    /// Check an email against the admin allow-list
    fn is_admin(&self, email: &str) -> bool;
}

/// Generate a signed session token for a user
fn generate_token(user: &User, config: &Config) -> AppResult<String> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.session_ttl_hours);

    let claims = SessionClaims {
        sub: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.session_secret_bytes()),
    )?;

    Ok(token)
}

/// Verify a session token and extract claims
fn verify_token_internal(token: &str, config: &Config) -> AppResult<SessionClaims> {
    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.session_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    /// Create new auth service instance with Unit of Work
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn signup(&self, username: String, email: String, password: String) -> AppResult<User> {
        // Uniqueness pre-checks; the unique indexes remain the last line of
        // defense against races
        if self.uow.users().find_by_email(&email).await?.is_some()
            || self.uow.users().find_by_username(&username).await?.is_some()
        {
            return Err(AppError::conflict("Email or username"));
        }

        let password_hash = Password::new(&password)?.into_string();
        self.uow.users().create(username, email, password_hash).await
    }

    async fn signin(&self, email: String, password: String) -> AppResult<SigninOutcome> {
        let user_result = self.uow.users().find_by_email(&email).await?;

        // SECURITY: Perform password verification even if user doesn't exist
        // to prevent timing attacks that could enumerate valid emails.
        // We use a dummy hash that will always fail verification.
        let dummy_hash = "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let (password_hash, user_exists) = match &user_result {
            Some(user) => (user.password_hash.as_str(), true),
            None => (dummy_hash, false),
        };

        let stored_password = Password::from_hash(password_hash.to_string());
        let password_valid = stored_password.verify(&password);

        // Only succeed if both user exists AND password is valid
        if !user_exists || !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let user = user_result.as_ref().ok_or(AppError::InvalidCredentials)?;
        let token = generate_token(user, &self.config)?;
        let is_admin = self.config.is_admin(&user.email);

        tracing::info!("Signin success: {} (admin: {})", user.email, is_admin);

        Ok(SigninOutcome {
            token,
            max_age_seconds: self.config.session_ttl_hours * SECONDS_PER_HOUR,
            username: user.username.clone(),
            is_admin,
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<SessionClaims> {
        verify_token_internal(token, &self.config)
    }

    fn is_admin(&self, email: &str) -> bool {
        self.config.is_admin(email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;

    fn test_user() -> User {
        User::new(
            Uuid::new_v4(),
            "yacine".to_string(),
            "yacine@enit.tn".to_string(),
            "hash".to_string(),
        )
    }

    #[test]
    fn token_round_trips_through_verify() {
        let config = Config::for_tests();
        let user = test_user();

        let token = generate_token(&user, &config).unwrap();
        let claims = verify_token_internal(&token, &config).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.username, "yacine");
        assert_eq!(claims.email, "yacine@enit.tn");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn garbage_token_is_rejected() {
        let config = Config::for_tests();
        assert!(verify_token_internal("not-a-token", &config).is_err());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let config = Config::for_tests();
        let user = test_user();
        let token = generate_token(&user, &config).unwrap();

        // A token must not verify against a different secret
        let other = jsonwebtoken::decode::<SessionClaims>(
            &token,
            &DecodingKey::from_secret(b"another-secret-with-enough-length!"),
            &Validation::default(),
        );
        assert!(other.is_err());
    }
}
