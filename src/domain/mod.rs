//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod event;
pub mod participation;
pub mod password;
pub mod user;

pub use event::{Category, Event, EventResponse, NewEvent};
pub use participation::Participation;
pub use password::Password;
pub use user::{User, UserResponse};
