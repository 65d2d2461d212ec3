//! Service Container - Centralized service access.
//!
//! Owns construction of the concrete services so wiring lives in one
//! place; consumers depend on the service traits only.

use std::sync::Arc;

use super::{
    Assistant, AuthService, Authenticator, ChatService, EventManager, EventService,
    ParticipationManager, ParticipationService,
};
use crate::config::Config;
use crate::infra::{GenAiClient, GenerativeClient, Persistence};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get event service
    fn events(&self) -> Arc<dyn EventService>;

    /// Get participation service
    fn participation(&self) -> Arc<dyn ParticipationService>;

    /// Get chat service
    fn chat(&self) -> Arc<dyn ChatService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    event_service: Arc<dyn EventService>,
    participation_service: Arc<dyn ParticipationService>,
    chat_service: Arc<dyn ChatService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        event_service: Arc<dyn EventService>,
        participation_service: Arc<dyn ParticipationService>,
        chat_service: Arc<dyn ChatService>,
    ) -> Self {
        Self {
            auth_service,
            event_service,
            participation_service,
            chat_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let genai: Arc<dyn GenerativeClient> =
            Arc::new(GenAiClient::new(config.genai_api_key().map(String::from)));

        let auth_service = Arc::new(Authenticator::new(uow.clone(), config));
        let event_service = Arc::new(EventManager::new(uow.clone()));
        let participation_service = Arc::new(ParticipationManager::new(uow.clone()));
        let chat_service = Arc::new(Assistant::new(uow, genai));

        Self {
            auth_service,
            event_service,
            participation_service,
            chat_service,
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn events(&self) -> Arc<dyn EventService> {
        self.event_service.clone()
    }

    fn participation(&self) -> Arc<dyn ParticipationService> {
        self.participation_service.clone()
    }

    fn chat(&self) -> Arc<dyn ChatService> {
        self.chat_service.clone()
    }
}
