//! Unit of Work - centralized repository access.
//!
//! Services depend on this trait instead of individual stores, keeping
//! construction wiring in one place. No operation here spans multiple
//! aggregates, so no explicit transaction management is carried; the
//! single-statement handlers rely on the store's own atomicity and the
//! schema's cascading foreign keys.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::repositories::{
    EventRepository, EventStore, ParticipationRepository, ParticipationStore, UserRepository,
    UserStore,
};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get event repository
    fn events(&self) -> Arc<dyn EventRepository>;

    /// Get participation repository
    fn participation(&self) -> Arc<dyn ParticipationRepository>;
}

/// Concrete implementation of UnitOfWork backed by SeaORM stores
pub struct Persistence {
    user_repo: Arc<UserStore>,
    event_repo: Arc<EventStore>,
    participation_repo: Arc<ParticipationStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            event_repo: Arc::new(EventStore::new(db.clone())),
            participation_repo: Arc::new(ParticipationStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn events(&self) -> Arc<dyn EventRepository> {
        self.event_repo.clone()
    }

    fn participation(&self) -> Arc<dyn ParticipationRepository> {
        self.participation_repo.clone()
    }
}
