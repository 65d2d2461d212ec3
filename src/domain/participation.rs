//! Participation domain entity.
//!
//! A participation is a user's registered intent to attend an event,
//! keyed by (user email, event id). The store enforces at most one row
//! per pair; both sides cascade on delete.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Participation domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participation {
    pub user_email: String,
    pub event_id: i64,
    pub created_at: DateTime<Utc>,
}
