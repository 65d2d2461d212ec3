//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion, with repository access going through the
//! Unit of Work.

mod auth_service;
mod chat_service;
pub mod container;
mod event_service;
mod participation_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, SessionClaims, SigninOutcome};
pub use chat_service::{Assistant, ChatService};
pub use event_service::{EventManager, EventService};
pub use participation_service::{ParticipationManager, ParticipationService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
