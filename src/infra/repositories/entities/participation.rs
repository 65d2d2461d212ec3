//! SeaORM entity for the participation join table.
//!
//! Composite primary key (user_email, event_id); the database enforces
//! uniqueness and cascades deletes from both parents.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "participation")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_email: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub event_id: i64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::Participation {
    fn from(model: Model) -> Self {
        Self {
            user_email: model.user_email,
            event_id: model.event_id,
            created_at: model.created_at,
        }
    }
}
