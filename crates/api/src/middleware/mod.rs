//! Request extractors for access control.

mod auth;

pub use auth::{AuthUser, CurrentUser, RequireAdmin};
