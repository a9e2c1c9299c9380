//! Business logic services.
//!
//! Services sit between the route handlers and the store: handlers parse
//! the wire format, services validate and drive the domain, the store
//! persists. Construction is cheap; handlers build a service per request
//! from [`crate::state::AppState`].

pub mod auth;
pub mod orders;
pub mod sms;
