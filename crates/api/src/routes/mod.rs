//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET   /health                        - Liveness check
//! GET   /health/ready                  - Readiness check (store reachable)
//!
//! # Auth
//! POST  /api/auth/request-otp          - Issue an OTP to a phone number
//! POST  /api/auth/verify-otp           - Exchange phone + OTP for a token
//! PATCH /api/auth/profile              - Complete/edit profile (auth)
//! GET   /api/auth/me                   - Current user (auth)
//!
//! # Addresses (auth, owner-only)
//! GET    /api/addresses                - List own addresses
//! POST   /api/addresses                - Create address
//! PATCH  /api/addresses/{id}           - Update address
//! DELETE /api/addresses/{id}           - Delete address
//!
//! # Products
//! GET    /api/products                 - Catalog listing (public)
//! GET    /api/products/{id}            - Product detail (public)
//! POST   /api/products                 - Create product (admin)
//! PATCH  /api/products/{id}            - Update product (admin)
//! DELETE /api/products/{id}            - Delete product (admin)
//!
//! # Orders
//! GET   /api/orders                    - Own order history (auth)
//! POST  /api/orders                    - Place order (auth)
//! GET   /api/admin/orders              - All orders (admin)
//! PATCH /api/admin/orders/{id}/status  - Set order status (admin)
//!
//! # Payments
//! POST  /api/payments/intent           - Payment capture stub (501)
//! ```

pub mod addresses;
pub mod auth;
pub mod orders;
pub mod payments;
pub mod products;

use std::str::FromStr;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, patch, post},
};

use crate::error::ApiError;
use crate::state::AppState;

/// Parse a path segment into an entity id.
///
/// A malformed id gets the same 404 as an unknown one, so probing with
/// garbage reveals nothing about what ids look like.
fn parse_id<T: FromStr>(raw: &str, entity: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::NotFound(entity.to_owned()))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/request-otp", post(auth::request_otp))
        .route("/verify-otp", post(auth::verify_otp))
        .route("/profile", patch(auth::update_profile))
        .route("/me", get(auth::me))
}

/// Create the address routes router.
pub fn address_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(addresses::list).post(addresses::create))
        .route(
            "/{id}",
            patch(addresses::update).delete(addresses::delete),
        )
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list).post(products::create))
        .route(
            "/{id}",
            get(products::show)
                .patch(products::update)
                .delete(products::delete),
        )
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new().route("/", get(orders::list_own).post(orders::create))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(orders::list_all))
        .route("/orders/{id}/status", patch(orders::update_status))
}

/// Create the full application router.
#[must_use]
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/api/auth", auth_routes())
        .nest("/api/addresses", address_routes())
        .nest("/api/products", product_routes())
        .nest("/api/orders", order_routes())
        .nest("/api/admin", admin_routes())
        .route("/api/payments/intent", post(payments::create_intent))
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies the store answers a trivial read before returning OK.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.store().products().await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
