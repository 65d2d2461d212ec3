//! Event service - listing, creation, and deletion of events.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Event, NewEvent};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

/// Event service trait for dependency injection.
#[async_trait]
pub trait EventService: Send + Sync {
    /// List all events, most recently created first
    async fn list_events(&self) -> AppResult<Vec<Event>>;

    /// Create a new event from a parsed admin form submission
    async fn create_event(&self, new_event: NewEvent) -> AppResult<Event>;

    /// Delete an event by id; its participation rows cascade away
    async fn delete_event(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of EventService using Unit of Work.
pub struct EventManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> EventManager<U> {
    /// Create new event service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> EventService for EventManager<U> {
    async fn list_events(&self) -> AppResult<Vec<Event>> {
        self.uow.events().list().await
    }

    async fn create_event(&self, new_event: NewEvent) -> AppResult<Event> {
        let event = self.uow.events().create(new_event).await?;
        tracing::info!("Event created: {} ({})", event.titre, event.id);
        Ok(event)
    }

    async fn delete_event(&self, id: i64) -> AppResult<()> {
        self.uow.events().delete(id).await?;
        tracing::info!("Event deleted: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use crate::errors::AppError;
    use crate::infra::{
        EventRepository, MockEventRepository, MockParticipationRepository, MockUserRepository,
        ParticipationRepository, UserRepository,
    };
    use chrono::{NaiveDate, Utc};
    use mockall::predicate::eq;

    struct TestUow {
        events: Arc<MockEventRepository>,
    }

    impl UnitOfWork for TestUow {
        fn users(&self) -> Arc<dyn UserRepository> {
            Arc::new(MockUserRepository::new())
        }

        fn events(&self) -> Arc<dyn EventRepository> {
            self.events.clone()
        }

        fn participation(&self) -> Arc<dyn ParticipationRepository> {
            Arc::new(MockParticipationRepository::new())
        }
    }

    fn manager_with(events: MockEventRepository) -> EventManager<TestUow> {
        EventManager::new(Arc::new(TestUow {
            events: Arc::new(events),
        }))
    }

    fn stored_event(new_event: NewEvent) -> Event {
        Event {
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
        }
    }

    #[tokio::test]
    async fn create_event_persists_and_returns_the_event() {
        let mut events = MockEventRepository::new();
        events
            .expect_create()
            .withf(|ne| ne.titre == "Forum des entreprises")
            .returning(|ne| Ok(stored_event(ne)));

        let manager = manager_with(events);
        let event = manager
            .create_event(NewEvent {
                titre: "Forum des entreprises".to_string(),
                date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
                lieu: Some("Amphi A".to_string()),
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

        assert_eq!(event.titre, "Forum des entreprises");
        assert!(event.id > 0);
    }

    #[tokio::test]
    async fn delete_event_passes_the_id_through() {
        let mut events = MockEventRepository::new();
        events
            .expect_delete()
            .with(eq(42i64))
            .returning(|_| Ok(()));

        let manager = manager_with(events);
        assert!(manager.delete_event(42).await.is_ok());
    }

    #[tokio::test]
    async fn delete_of_missing_event_surfaces_not_found() {
        let mut events = MockEventRepository::new();
        events.expect_delete().returning(|_| Err(AppError::NotFound));

        let manager = manager_with(events);
        let result = manager.delete_event(7).await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound));
    }
}
