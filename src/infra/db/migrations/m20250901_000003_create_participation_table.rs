//! Migration: Create the participation join table.
//!
//! Composite primary key rejects duplicate participation; foreign keys
//! cascade so deleting an event (or a user) removes its rows.

use sea_orm_migration::prelude::*;

use super::m20250901_000001_create_users_table::Users;
use super::m20250901_000002_create_events_table::Events;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Participation::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Participation::UserEmail).string().not_null())
                    .col(
                        ColumnDef::new(Participation::EventId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Participation::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(Participation::UserEmail)
                            .col(Participation::EventId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_participation_user_email")
                            .from(Participation::Table, Participation::UserEmail)
                            .to(Users::Table, Users::Email)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_participation_event_id")
                            .from(Participation::Table, Participation::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Participation::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Participation {
    Table,
    UserEmail,
    EventId,
    CreatedAt,
}
