//! Integration tests for API endpoints.
//!
//! These tests use mock services to test API behavior without requiring
//! an actual database connection or a generative-language API key.

use async_trait::async_trait;
use axum::http::StatusCode;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use enit_events::domain::{Category, Event, NewEvent, Participation, User};
use enit_events::errors::{AppError, AppResult};
use enit_events::services::{
    AuthService, ChatService, EventService, ParticipationService, SessionClaims, SigninOutcome,
};

// =============================================================================
// Mock Services for Testing
// =============================================================================

const ADMIN_EMAIL: &str = "admin@enit.tn";

/// Mock auth service that returns predefined responses
struct MockAuthService;

#[async_trait]
impl AuthService for MockAuthService {
    async fn signup(&self, username: String, email: String, _password: String) -> AppResult<User> {
        if email == "taken@enit.tn" {
            return Err(AppError::conflict("Email or username"));
        }
        Ok(User::new(Uuid::new_v4(), username, email, "hashed".to_string()))
    }

    async fn signin(&self, email: String, password: String) -> AppResult<SigninOutcome> {
        if password != "correct-password" {
            return Err(AppError::InvalidCredentials);
        }
        let is_admin = self.is_admin(&email);
        Ok(SigninOutcome {
            token: "mock-session-token".to_string(),
            max_age_seconds: 86400,
            username: "yacine".to_string(),
            is_admin,
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<SessionClaims> {
        if token == "valid-test-token" {
            Ok(SessionClaims {
                sub: Uuid::new_v4(),
                username: "yacine".to_string(),
                email: ADMIN_EMAIL.to_string(),
                exp: Utc::now().timestamp() + 3600,
                iat: Utc::now().timestamp(),
            })
        } else {
            Err(AppError::Unauthorized)
        }
    }

    fn is_admin(&self, email: &str) -> bool {
        email.trim().eq_ignore_ascii_case(ADMIN_EMAIL)
    }
}

/// Mock event service over an in-memory list
struct MockEventService {
    events: Vec<Event>,
}

fn sample_event(id: i64, titre: &str) -> Event {
    Event {
        id,
        titre: titre.to_string(),
        date: NaiveDate::from_ymd_opt(2026, 9, 15).unwrap(),
        lieu: Some("Amphi A".to_string()),
        categorie: Category::Forum,
        description: Some("Rencontre avec les recruteurs".to_string()),
        adresse: "ENIT, Tunis".to_string(),
        lat: None,
        lng: None,
        affiche: Some("poster.png".to_string()),
        fiche: None,
        created_at: Utc::now(),
    }
}

#[async_trait]
impl EventService for MockEventService {
    async fn list_events(&self) -> AppResult<Vec<Event>> {
        Ok(self.events.clone())
    }

    async fn create_event(&self, new_event: NewEvent) -> AppResult<Event> {
        Ok(Event {
            id: Event::generate_id(),
            titre: new_event.titre,
            date: new_event.date,
            lieu: new_event.lieu,
            categorie: new_event.categorie,
            description: new_event.description,
            adresse: new_event.adresse,
            lat: new_event.lat,
            lng: new_event.lng,
            affiche: new_event.affiche,
            fiche: new_event.fiche,
            created_at: Utc::now(),
        })
    }

    async fn delete_event(&self, id: i64) -> AppResult<()> {
        if self.events.iter().any(|e| e.id == id) {
            Ok(())
        } else {
            Err(AppError::NotFound)
        }
    }
}

/// Mock participation service that remembers one existing registration
struct MockParticipationService;

#[async_trait]
impl ParticipationService for MockParticipationService {
    async fn participate(&self, user_email: String, event_id: i64) -> AppResult<Participation> {
        if event_id == 404 {
            return Err(AppError::NotFound);
        }
        if user_email == "already@enit.tn" {
            return Err(AppError::AlreadyParticipating);
        }
        Ok(Participation {
            user_email,
            event_id,
            created_at: Utc::now(),
        })
    }
}

/// Mock chat service that echoes a canned answer
struct MockChatService;

#[async_trait]
impl ChatService for MockChatService {
    async fn answer(&self, message: &str) -> AppResult<String> {
        Ok(format!("You asked: {}", message))
    }
}

// =============================================================================
// Error Type Tests
// =============================================================================

#[tokio::test]
async fn test_app_error_types() {
    let not_found = AppError::NotFound;
    let unauthorized = AppError::Unauthorized;
    let validation = AppError::validation("invalid field");
    let internal = AppError::internal("server error");

    assert!(matches!(not_found, AppError::NotFound));
    assert!(matches!(unauthorized, AppError::Unauthorized));
    assert!(matches!(validation, AppError::Validation(_)));
    assert!(matches!(internal, AppError::Internal(_)));
}

#[tokio::test]
async fn test_app_error_status_codes() {
    use axum::response::IntoResponse;

    let response = AppError::NotFound.into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = AppError::Unauthorized.into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = AppError::Forbidden.into_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Duplicate participation maps to 400 rather than 409
    let response = AppError::AlreadyParticipating.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = AppError::conflict("Email").into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = AppError::upstream("model unavailable").into_response();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

// =============================================================================
// Domain Model Tests
// =============================================================================

#[tokio::test]
async fn test_category_parsing() {
    assert_eq!(Category::from("conference"), Category::Conference);
    assert_eq!(Category::from("formation2"), Category::Formation2);
    // Unknown and empty values fall back to the default grouping
    assert_eq!(Category::from("whatever"), Category::Forum);
    assert_eq!(Category::from(""), Category::Forum);
}

#[tokio::test]
async fn test_event_id_generation_is_monotonic_enough() {
    let a = Event::generate_id();
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    let b = Event::generate_id();
    assert!(b > a);
}

// =============================================================================
// Password Hashing Tests
// =============================================================================

#[tokio::test]
async fn test_password_hashing() {
    use enit_events::domain::Password;

    let plain_password = "secure_password_123";
    let password = Password::new(plain_password).expect("Hashing should succeed");
    let hash = password.into_string();

    // Hash should be different from original
    assert_ne!(hash.as_str(), plain_password);

    // Hash should be verifiable
    let stored = Password::from_hash(hash);
    assert!(stored.verify(plain_password));

    // Wrong password should not verify
    assert!(!stored.verify("wrong_password"));
}

#[tokio::test]
async fn test_password_hash_uniqueness() {
    use enit_events::domain::Password;

    let plain_password = "same_password";
    let hash1 = Password::new(plain_password).expect("Hashing should succeed").into_string();
    let hash2 = Password::new(plain_password).expect("Hashing should succeed").into_string();

    // Same password should produce different hashes (due to salt)
    assert_ne!(hash1.as_str(), hash2.as_str());

    assert!(Password::from_hash(hash1).verify(plain_password));
    assert!(Password::from_hash(hash2).verify(plain_password));
}

// =============================================================================
// Session Claims Tests
// =============================================================================

#[tokio::test]
async fn test_claims_structure() {
    let claims = SessionClaims {
        sub: Uuid::new_v4(),
        username: "yacine".to_string(),
        email: "yacine@enit.tn".to_string(),
        exp: Utc::now().timestamp() + 3600,
        iat: Utc::now().timestamp(),
    };

    assert!(!claims.email.is_empty());
    assert!(claims.exp > claims.iat);
}

// =============================================================================
// Mock Service Tests
// =============================================================================

#[tokio::test]
async fn test_mock_auth_service_signup() {
    let service = MockAuthService;
    let result = service
        .signup(
            "yacine".to_string(),
            "yacine@enit.tn".to_string(),
            "password123".to_string(),
        )
        .await;

    assert!(result.is_ok());
    let user = result.unwrap();
    assert_eq!(user.email, "yacine@enit.tn");
    assert_eq!(user.username, "yacine");
}

#[tokio::test]
async fn test_mock_auth_service_signup_duplicate() {
    let service = MockAuthService;
    let result = service
        .signup(
            "other".to_string(),
            "taken@enit.tn".to_string(),
            "password123".to_string(),
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn test_mock_auth_service_signin_admin() {
    let service = MockAuthService;
    let outcome = service
        .signin("Admin@ENIT.tn".to_string(), "correct-password".to_string())
        .await
        .unwrap();

    // Admin detection is case-insensitive
    assert!(outcome.is_admin);
    assert!(!outcome.token.is_empty());
    assert!(outcome.max_age_seconds > 0);
}

#[tokio::test]
async fn test_mock_auth_service_signin_regular_user() {
    let service = MockAuthService;
    let outcome = service
        .signin("student@enit.tn".to_string(), "correct-password".to_string())
        .await
        .unwrap();

    assert!(!outcome.is_admin);
}

#[tokio::test]
async fn test_mock_auth_service_signin_wrong_password() {
    let service = MockAuthService;
    let result = service
        .signin("student@enit.tn".to_string(), "wrong".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
}

#[tokio::test]
async fn test_mock_auth_service_verify_invalid_token() {
    let service = MockAuthService;
    let result = service.verify_token("invalid-token");

    assert!(result.is_err());
    assert!(matches!(result.unwrap_err(), AppError::Unauthorized));
}

#[tokio::test]
async fn test_mock_event_service_list() {
    let service = MockEventService {
        events: vec![sample_event(2, "Conf IA"), sample_event(1, "Forum")],
    };

    let events = service.list_events().await.unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].titre, "Conf IA");
}

#[tokio::test]
async fn test_mock_event_service_create_assigns_id() {
    let service = MockEventService { events: vec![] };

    let event = service
        .create_event(NewEvent {
            titre: "Forum des entreprises".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            lieu: None,
            categorie: Category::Forum,
            description: None,
            adresse: String::new(),
            lat: None,
            lng: None,
            affiche: None,
            fiche: None,
        })
        .await
        .unwrap();

    assert!(event.id > 0);
    assert_eq!(event.titre, "Forum des entreprises");
    assert_eq!(event.categorie, Category::Forum);
}

#[tokio::test]
async fn test_mock_event_service_delete_missing() {
    let service = MockEventService { events: vec![] };
    let result = service.delete_event(12345).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn test_mock_participation_service_registers() {
    let service = MockParticipationService;
    let participation = service
        .participate("student@enit.tn".to_string(), 1)
        .await
        .unwrap();

    assert_eq!(participation.user_email, "student@enit.tn");
    assert_eq!(participation.event_id, 1);
}

#[tokio::test]
async fn test_mock_participation_service_rejects_duplicate() {
    let service = MockParticipationService;
    let result = service.participate("already@enit.tn".to_string(), 1).await;

    assert!(matches!(result.unwrap_err(), AppError::AlreadyParticipating));
}

#[tokio::test]
async fn test_mock_participation_service_missing_event() {
    let service = MockParticipationService;
    let result = service.participate("student@enit.tn".to_string(), 404).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn test_mock_chat_service_answers() {
    let service = MockChatService;
    let answer = service.answer("Quand a lieu le forum ?").await.unwrap();

    assert!(answer.contains("forum"));
}

// =============================================================================
// Wire Format Tests
// =============================================================================

#[tokio::test]
async fn test_participate_request_uses_camel_case_key() {
    use enit_events::api::handlers::participation_handler::ParticipateRequest;

    // The public contract spells the field eventId
    let payload: ParticipateRequest =
        serde_json::from_str(r#"{"eventId": 1717171717171}"#).unwrap();
    assert_eq!(payload.event_id, 1717171717171);

    let snake = serde_json::from_str::<ParticipateRequest>(r#"{"event_id": 1}"#);
    assert!(snake.is_err());
}

// =============================================================================
// Integration Tests (Require Infrastructure)
// =============================================================================
//
// These run against a real PostgreSQL instance:
// 1. Start PostgreSQL
// 2. Set DATABASE_URL and SESSION_SECRET environment variables
// 3. Run: cargo test -- --ignored

fn unique_suffix() -> String {
    Uuid::new_v4().simple().to_string()
}

fn event_form(titre: &str) -> NewEvent {
    NewEvent {
        titre: titre.to_string(),
        date: NaiveDate::from_ymd_opt(2026, 9, 15).unwrap(),
        lieu: Some("Amphi A".to_string()),
        categorie: Category::Forum,
        description: None,
        adresse: String::new(),
        lat: None,
        lng: None,
        affiche: None,
        fiche: None,
    }
}

#[tokio::test]
#[ignore = "Requires database"]
async fn created_event_leads_the_listing() {
    use enit_events::infra::{Database, Persistence, UnitOfWork};
    use enit_events::Config;

    let config = Config::from_env();
    let db = Database::connect(&config).await.unwrap();
    let uow = Persistence::new(db.get_connection());

    let titre = format!("Listing check {}", unique_suffix());
    let created = uow.events().create(event_form(&titre)).await.unwrap();

    let events = uow.events().list().await.unwrap();
    assert_eq!(events.first().map(|e| e.id), Some(created.id));

    uow.events().delete(created.id).await.unwrap();
    let events = uow.events().list().await.unwrap();
    assert!(events.iter().all(|e| e.id != created.id));
}

#[tokio::test]
#[ignore = "Requires database"]
async fn deleting_an_event_cascades_its_participation_rows() {
    use enit_events::infra::{Database, Persistence, UnitOfWork};
    use enit_events::Config;
    use sea_orm::{ConnectionTrait, Statement};

    let config = Config::from_env();
    let db = Database::connect(&config).await.unwrap();
    let uow = Persistence::new(db.get_connection());

    let suffix = unique_suffix();
    let user = uow
        .users()
        .create(
            format!("part-{}", suffix),
            format!("part-{}@enit.tn", suffix),
            "hash".to_string(),
        )
        .await
        .unwrap();
    let event = uow
        .events()
        .create(event_form(&format!("Cascade check {}", suffix)))
        .await
        .unwrap();

    uow.participation()
        .create(user.email.clone(), event.id)
        .await
        .unwrap();

    uow.events().delete(event.id).await.unwrap();

    let conn = db.get_connection();
    let count = Statement::from_sql_and_values(
        conn.get_database_backend(),
        "SELECT COUNT(*) AS n FROM participation WHERE event_id = $1",
        [event.id.into()],
    );
    let row = conn.query_one(count).await.unwrap().unwrap();
    let remaining: i64 = row.try_get("", "n").unwrap();
    assert_eq!(remaining, 0);

    let cleanup = Statement::from_sql_and_values(
        conn.get_database_backend(),
        "DELETE FROM users WHERE email = $1",
        [user.email.into()],
    );
    conn.execute(cleanup).await.unwrap();
}
