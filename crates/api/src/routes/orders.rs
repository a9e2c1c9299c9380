//! Order routes: checkout, history, and the admin status workflow.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use charkha_core::{AddressId, Amount, OrderId, OrderStatus};

use crate::error::Result;
use crate::middleware::{CurrentUser, RequireAdmin};
use crate::models::{Order, OrderItem};
use crate::services::orders::{Checkout, OrderService};
use crate::state::AppState;

use super::parse_id;

/// Request body for `POST /api/orders`.
///
/// The cart snapshot is submitted by the client and persisted verbatim;
/// `addressId` optionally links a saved address, while `shippingAddress`
/// is the denormalized text that survives address deletion.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutBody {
    pub items: Vec<OrderItem>,
    pub total_amount: Amount,
    pub address_id: Option<String>,
    pub shipping_address: String,
}

/// List the caller's orders, newest first.
///
/// GET /api/orders
///
/// # Errors
///
/// Returns 401 without a valid token.
pub async fn list_own(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
) -> Result<Json<Vec<Order>>> {
    Ok(Json(state.store().orders_for(caller.id).await?))
}

/// Place an order.
///
/// POST /api/orders
///
/// # Errors
///
/// Returns 400 for an empty cart, zero quantity or short shipping text,
/// 404 for an address reference that is not the caller's.
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Json(body): Json<CheckoutBody>,
) -> Result<(StatusCode, Json<Order>)> {
    let address_id = body
        .address_id
        .as_deref()
        .map(|raw| parse_id::<AddressId>(raw, "Address"))
        .transpose()?;

    let order = OrderService::new(state.store())
        .checkout(
            caller.id,
            Checkout {
                items: body.items,
                total_amount: body.total_amount,
                address_id,
                shipping_address: body.shipping_address,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// List every order, newest first.
///
/// GET /api/admin/orders
///
/// # Errors
///
/// Returns 403 without the admin role.
pub async fn list_all(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Order>>> {
    Ok(Json(state.store().orders().await?))
}

/// Request body for `PATCH /api/admin/orders/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: OrderStatus,
}

/// Replace an order's lifecycle status.
///
/// PATCH /api/admin/orders/{id}/status
///
/// Any status may follow any other.
///
/// # Errors
///
/// Returns 403 without the admin role, 404 for an unknown id.
pub async fn update_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(raw_id): Path<String>,
    Json(body): Json<StatusBody>,
) -> Result<Json<Order>> {
    let id: OrderId = parse_id(&raw_id, "Order")?;
    let order = OrderService::new(state.store())
        .set_status(id, body.status)
        .await?;
    Ok(Json(order))
}
