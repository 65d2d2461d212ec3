//! SeaORM entity for the events table.
//!
//! Latitude and longitude are stored as text, matching what the map picker
//! submits; they are never used for computation server-side.

use sea_orm::entity::prelude::*;

use crate::domain::Category;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub titre: String,
    pub date: Date,
    pub lieu: Option<String>,
    pub categorie: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub adresse: String,
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub affiche: Option<String>,
    pub fiche: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::Event {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            titre: model.titre,
            date: model.date,
            lieu: model.lieu,
            categorie: Category::from(model.categorie.as_str()),
            description: model.description,
            adresse: model.adresse,
            lat: model.lat,
            lng: model.lng,
            affiche: model.affiche,
            fiche: model.fiche,
            created_at: model.created_at,
        }
    }
}
