//! HTTP request handlers.

pub mod auth_handler;
pub mod chat_handler;
pub mod event_handler;
pub mod participation_handler;

pub use auth_handler::auth_routes;
