//! Participation repository - Data access for the participation join table.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, Set, SqlErr};

use super::entities::participation;
use crate::domain::Participation;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Participation repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ParticipationRepository: Send + Sync {
    /// Register a user's participation in an event.
    ///
    /// A duplicate (user, event) pair is rejected with a dedicated error,
    /// distinct from generic database failures.
    async fn create(&self, user_email: String, event_id: i64) -> AppResult<Participation>;
}

/// SeaORM-backed participation repository
pub struct ParticipationStore {
    db: DatabaseConnection,
}

impl ParticipationStore {
    /// Create a new participation store
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Map constraint violations onto domain errors.
    fn map_insert_error(err: DbErr) -> AppError {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::AlreadyParticipating,
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => AppError::NotFound,
            _ => AppError::from(err),
        }
    }
}

#[async_trait]
impl ParticipationRepository for ParticipationStore {
    async fn create(&self, user_email: String, event_id: i64) -> AppResult<Participation> {
        let active_model = participation::ActiveModel {
            user_email: Set(user_email),
            event_id: Set(event_id),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(Self::map_insert_error)?;

        Ok(Participation::from(model))
    }
}
