//! Participation service - registering intent to attend an event.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::Participation;
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

/// Participation service trait for dependency injection.
#[async_trait]
pub trait ParticipationService: Send + Sync {
    /// Register the session user's participation in an event.
    ///
    /// Duplicate participation surfaces as a dedicated error, distinct
    /// from other store failures.
    async fn participate(&self, user_email: String, event_id: i64) -> AppResult<Participation>;
}

/// Concrete implementation of ParticipationService using Unit of Work.
pub struct ParticipationManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ParticipationManager<U> {
    /// Create new participation service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ParticipationService for ParticipationManager<U> {
    async fn participate(&self, user_email: String, event_id: i64) -> AppResult<Participation> {
        let participation = self.uow.participation().create(user_email, event_id).await?;
        tracing::info!(
            "Participation registered: {} -> {}",
            participation.user_email,
            participation.event_id
        );
        Ok(participation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::infra::{
        EventRepository, MockEventRepository, MockParticipationRepository, MockUserRepository,
        ParticipationRepository, UserRepository,
    };
    use chrono::Utc;

    struct TestUow {
        participation: Arc<MockParticipationRepository>,
    }

    impl UnitOfWork for TestUow {
        fn users(&self) -> Arc<dyn UserRepository> {
            Arc::new(MockUserRepository::new())
        }

        fn events(&self) -> Arc<dyn EventRepository> {
            Arc::new(MockEventRepository::new())
        }

        fn participation(&self) -> Arc<dyn ParticipationRepository> {
            self.participation.clone()
        }
    }

    fn manager_with(participation: MockParticipationRepository) -> ParticipationManager<TestUow> {
        ParticipationManager::new(Arc::new(TestUow {
            participation: Arc::new(participation),
        }))
    }

    #[tokio::test]
    async fn participation_is_stored_for_the_user() {
        let mut store = MockParticipationRepository::new();
        store.expect_create().returning(|user_email, event_id| {
            Ok(Participation {
                user_email,
                event_id,
                created_at: Utc::now(),
            })
        });

        let manager = manager_with(store);
        let participation = manager
            .participate("student@enit.tn".to_string(), 99)
            .await
            .unwrap();

        assert_eq!(participation.user_email, "student@enit.tn");
        assert_eq!(participation.event_id, 99);
    }

    #[tokio::test]
    async fn duplicate_participation_is_rejected() {
        let mut store = MockParticipationRepository::new();
        store
            .expect_create()
            .returning(|_, _| Err(AppError::AlreadyParticipating));

        let manager = manager_with(store);
        let result = manager.participate("student@enit.tn".to_string(), 99).await;

        assert!(matches!(result.unwrap_err(), AppError::AlreadyParticipating));
    }
}
