//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connection and repositories
//! - The generative-language API client
//! - Filesystem storage for uploads
//! - Unit of Work for centralized repository access

pub mod db;
pub mod genai;
pub mod persistence;
pub mod repositories;
pub mod uploads;

pub use db::{Database, Migrator};
pub use genai::{GenAiClient, GenerativeClient};
pub use persistence::{Persistence, UnitOfWork};
pub use repositories::{
    EventRepository, EventStore, ParticipationRepository, ParticipationStore, UserRepository,
    UserStore,
};
pub use uploads::UploadStore;

#[cfg(any(test, feature = "test-utils"))]
pub use genai::MockGenerativeClient;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockEventRepository, MockParticipationRepository, MockUserRepository};
