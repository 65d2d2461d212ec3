//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, UploadStore};
use crate::services::{
    AuthService, ChatService, EventService, ParticipationService, ServiceContainer, Services,
};

/// Application state containing all services (DI container).
///
/// Use `from_config()` for recommended initialization with full
/// ServiceContainer support.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Event service
    pub event_service: Arc<dyn EventService>,
    /// Participation service
    pub participation_service: Arc<dyn ParticipationService>,
    /// Chat service
    pub chat_service: Arc<dyn ChatService>,
    /// Upload storage
    pub uploads: Arc<UploadStore>,
    /// Database connection
    pub database: Arc<Database>,
    /// Application configuration
    pub config: Config,
    /// Internal service container (optional, only with from_config)
    service_container: Option<Arc<Services>>,
}

impl AppState {
    /// Create application state from infrastructure and config.
    ///
    /// This is the recommended way to create AppState as it uses
    /// the ServiceContainer for centralized service management.
    pub fn from_config(database: Arc<Database>, uploads: Arc<UploadStore>, config: Config) -> Self {
        let container = Arc::new(Services::from_connection(
            database.get_connection(),
            config.clone(),
        ));

        Self {
            auth_service: container.auth(),
            event_service: container.events(),
            participation_service: container.participation(),
            chat_service: container.chat(),
            uploads,
            database,
            config,
            service_container: Some(container),
        }
    }

    /// Create new application state with manually injected services.
    ///
    /// Note: This method does not provide ServiceContainer access.
    /// Use `from_config()` for full functionality.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        event_service: Arc<dyn EventService>,
        participation_service: Arc<dyn ParticipationService>,
        chat_service: Arc<dyn ChatService>,
        uploads: Arc<UploadStore>,
        database: Arc<Database>,
        config: Config,
    ) -> Self {
        Self {
            auth_service,
            event_service,
            participation_service,
            chat_service,
            uploads,
            database,
            config,
            service_container: None,
        }
    }

    /// Get the service container for centralized service access.
    ///
    /// Returns `Some` only if created via `from_config()`.
    pub fn services(&self) -> Option<&Arc<Services>> {
        self.service_container.as_ref()
    }
}
