//! Event repository - Data access for events.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use super::entities::event::{self, Entity as EventEntity};
use crate::domain::{Event, NewEvent};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Event repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// List all events, most recently created first
    async fn list(&self) -> AppResult<Vec<Event>>;

    /// Persist a new event under a freshly derived id
    async fn create(&self, new_event: NewEvent) -> AppResult<Event>;

    /// Delete an event by id; dependent participation rows cascade
    async fn delete(&self, id: i64) -> AppResult<()>;
}

/// SeaORM-backed event repository
pub struct EventStore {
    db: DatabaseConnection,
}

impl EventStore {
    /// Create a new event store
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EventRepository for EventStore {
    async fn list(&self) -> AppResult<Vec<Event>> {
        let models = EventEntity::find()
            .order_by_desc(event::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Event::from).collect())
    }

    async fn create(&self, new_event: NewEvent) -> AppResult<Event> {
        let active_model = event::ActiveModel {
            id: Set(Event::generate_id()),
            titre: Set(new_event.titre),
            date: Set(new_event.date),
            lieu: Set(new_event.lieu),
            categorie: Set(new_event.categorie.to_string()),
            description: Set(new_event.description),
            adresse: Set(new_event.adresse),
            lat: Set(new_event.lat),
            lng: Set(new_event.lng),
            affiche: Set(new_event.affiche),
            fiche: Set(new_event.fiche),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(Event::from(model))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = EventEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
