//! Order domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use charkha_core::{AddressId, Amount, OrderId, OrderStatus, PaymentStatus, ProductId, UserId};

/// One line of an order's cart snapshot.
///
/// Carries the name and price as they were at checkout; catalog edits after
/// the fact never touch it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    pub size: String,
    pub quantity: u32,
    pub price: Amount,
}

/// An immutable purchase snapshot.
///
/// Items and total are fixed at creation; only `status` and
/// `payment_status` mutate afterward. The shipping address text is
/// denormalized so deleting the referenced [`AddressId`] cannot corrupt
/// order history.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    pub total_amount: Amount,
    pub status: OrderStatus,
    pub address_id: Option<AddressId>,
    pub shipping_address: String,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

/// Validated input for creating an order at checkout.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    pub total_amount: Amount,
    pub address_id: Option<AddressId>,
    pub shipping_address: String,
}
