//! Event domain entity and related types.
//!
//! Field names mirror the public API contract, which uses the French form
//! field names of the original front-end (titre, lieu, affiche, fiche).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{
    CATEGORY_CONFERENCE, CATEGORY_FORMATION, CATEGORY_FORMATION2, CATEGORY_FORUM,
};

/// Event categories used for UI grouping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Forum,
    Conference,
    Formation2,
    Formation,
}

impl Category {
    /// String value as stored and exposed over the API
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Forum => CATEGORY_FORUM,
            Category::Conference => CATEGORY_CONFERENCE,
            Category::Formation2 => CATEGORY_FORMATION2,
            Category::Formation => CATEGORY_FORMATION,
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Forum
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        match s {
            CATEGORY_CONFERENCE => Category::Conference,
            CATEGORY_FORMATION2 => Category::Formation2,
            CATEGORY_FORMATION => Category::Formation,
            // Absent or unknown categories fall back to the default grouping
            _ => Category::Forum,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Event domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Timestamp-derived identifier (milliseconds since the epoch at creation)
    pub id: i64,
    pub titre: String,
    pub date: NaiveDate,
    pub lieu: Option<String>,
    pub categorie: Category,
    pub description: Option<String>,
    pub adresse: String,
    pub lat: Option<String>,
    pub lng: Option<String>,
    /// Stored filename of the uploaded poster
    pub affiche: Option<String>,
    /// Stored filename of the uploaded information sheet
    pub fiche: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Derive a fresh timestamp-based identifier.
    pub fn generate_id() -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Data required to create an event, after multipart parsing.
///
/// File fields carry the stored filenames produced by the upload store,
/// not the raw bytes.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub titre: String,
    pub date: NaiveDate,
    pub lieu: Option<String>,
    pub categorie: Category,
    pub description: Option<String>,
    pub adresse: String,
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub affiche: Option<String>,
    pub fiche: Option<String>,
}

/// Event response (shape returned to clients)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventResponse {
    /// Timestamp-derived identifier
    #[schema(example = 1717171717171i64)]
    pub id: i64,
    /// Event title
    #[schema(example = "Forum des entreprises")]
    pub titre: String,
    /// Event date
    pub date: NaiveDate,
    /// Venue name
    #[schema(example = "Amphi A")]
    pub lieu: Option<String>,
    /// Category used for UI grouping
    #[schema(example = "forum")]
    pub categorie: String,
    /// Free-form description
    pub description: Option<String>,
    /// Street address
    pub adresse: String,
    /// Latitude as captured by the map picker
    pub lat: Option<String>,
    /// Longitude as captured by the map picker
    pub lng: Option<String>,
    /// Stored poster filename, served under /uploads
    pub affiche: Option<String>,
    /// Stored sheet filename, served under /uploads
    pub fiche: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            titre: event.titre,
            date: event.date,
            lieu: event.lieu,
            categorie: event.categorie.to_string(),
            description: event.description,
            adresse: event.adresse,
            lat: event.lat,
            lng: event.lng,
            affiche: event.affiche,
            fiche: event.fiche,
            created_at: event.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_known_values() {
        assert_eq!(Category::from("forum"), Category::Forum);
        assert_eq!(Category::from("conference"), Category::Conference);
        assert_eq!(Category::from("formation2"), Category::Formation2);
        assert_eq!(Category::from("formation"), Category::Formation);
    }

    #[test]
    fn every_valid_category_round_trips() {
        use crate::config::{is_valid_category, VALID_CATEGORIES};

        for name in VALID_CATEGORIES {
            let category = Category::from(*name);
            assert_eq!(category.as_str(), *name);
            assert!(is_valid_category(category.as_str()));
        }
    }

    #[test]
    fn unknown_category_defaults_to_forum() {
        assert_eq!(Category::from("workshop"), Category::Forum);
        assert_eq!(Category::from(""), Category::Forum);
        assert_eq!(Category::default(), Category::Forum);
    }

    #[test]
    fn generated_ids_are_timestamp_ordered() {
        let first = Event::generate_id();
        let second = Event::generate_id();
        assert!(second >= first);
    }
}
