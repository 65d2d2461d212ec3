//! Migration: Create the events table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Events::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Events::Titre).string().not_null())
                    .col(ColumnDef::new(Events::Date).date().not_null())
                    .col(ColumnDef::new(Events::Lieu).string().null())
                    .col(ColumnDef::new(Events::Categorie).string().not_null())
                    .col(ColumnDef::new(Events::Description).text().null())
                    .col(ColumnDef::new(Events::Adresse).string().not_null())
                    .col(ColumnDef::new(Events::Lat).string().null())
                    .col(ColumnDef::new(Events::Lng).string().null())
                    .col(ColumnDef::new(Events::Affiche).string().null())
                    .col(ColumnDef::new(Events::Fiche).string().null())
                    .col(
                        ColumnDef::new(Events::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Listings are always ordered by creation time, descending
        manager
            .create_index(
                Index::create()
                    .name("idx_events_created_at")
                    .table(Events::Table)
                    .col(Events::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_events_created_at")
                    .table(Events::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(crate) enum Events {
    Table,
    Id,
    Titre,
    Date,
    Lieu,
    Categorie,
    Description,
    Adresse,
    Lat,
    Lng,
    Affiche,
    Fiche,
    CreatedAt,
}
