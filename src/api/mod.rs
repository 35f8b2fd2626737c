//! HTTP API for the social graph service

pub mod auth_handlers;
pub mod handlers;
pub mod routes;
pub mod user_handlers;

pub use routes::create_router;
