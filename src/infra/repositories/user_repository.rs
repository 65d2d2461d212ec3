//! User repository - Data access for user accounts.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr,
};
use uuid::Uuid;

use super::entities::user::{self, Entity as UserEntity};
use crate::domain::User;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Create a new user
    async fn create(&self, username: String, email: String, password_hash: String)
        -> AppResult<User>;
}

/// SeaORM-backed user repository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create a new user store
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Map constraint violations onto domain errors.
    ///
    /// The service pre-checks uniqueness, but a concurrent signup can
    /// still hit the unique indexes; that race is a conflict, not a
    /// server failure.
    fn map_insert_error(err: DbErr) -> AppError {
        match Self::classify_sql_err(err.sql_err()) {
            Some(mapped) => mapped,
            None => AppError::from(err),
        }
    }

    fn classify_sql_err(sql_err: Option<SqlErr>) -> Option<AppError> {
        match sql_err {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                Some(AppError::conflict("Email or username"))
            }
            _ => None,
        }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(
        &self,
        username: String,
        email: String,
        password_hash: String,
    ) -> AppResult<User> {
        let active_model = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(username),
            email: Set(email),
            password_hash: Set(password_hash),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(Self::map_insert_error)?;

        Ok(User::from(model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_on_insert_becomes_a_conflict() {
        let mapped = UserStore::classify_sql_err(Some(SqlErr::UniqueConstraintViolation(
            "duplicate key value violates unique constraint \"users_email_key\"".to_string(),
        )));

        assert!(matches!(mapped, Some(AppError::Conflict(_))));
    }

    #[test]
    fn other_database_errors_pass_through() {
        assert!(UserStore::classify_sql_err(None).is_none());
        assert!(UserStore::classify_sql_err(Some(SqlErr::ForeignKeyConstraintViolation(
            "fk".to_string()
        )))
        .is_none());
    }
}
