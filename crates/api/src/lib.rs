//! Charkha API - storefront and admin JSON API.
//!
//! # Architecture
//!
//! - Axum web framework serving a JSON REST API
//! - In-memory store behind the [`store::Storage`] trait (seeded at startup)
//! - Phone/OTP authentication issuing signed bearer tokens
//! - Admin surface gated by a role flag on the same API
//!
//! The cart and wishlist live in the client; the server only ever sees an
//! order's cart snapshot at checkout.
//!
//! # Modules
//!
//! - [`config`] - Environment-driven configuration
//! - [`error`] - `ApiError` taxonomy rendered as `{"message": ...}` JSON
//! - [`middleware`] - Bearer-token and admin-gating extractors
//! - [`models`] - Domain types (users, addresses, products, orders)
//! - [`routes`] - HTTP handlers and router assembly
//! - [`services`] - OTP state machine, token signing, checkout workflow
//! - [`state`] - Shared application state
//! - [`store`] - Storage contract and in-memory implementation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use routes::app;
