//! Checkout and order lifecycle.
//!
//! Checkout persists the client's cart snapshot verbatim: item names,
//! prices and the submitted total are recorded as-is and never recomputed,
//! so later catalog edits cannot rewrite purchase history. Validation here
//! is structural (amounts parse, quantities positive, a referenced address
//! actually belongs to the buyer), not re-pricing.

use thiserror::Error;

use charkha_core::{AddressId, Amount, OrderId, OrderStatus, UserId};

use crate::models::{NewOrder, Order, OrderItem};
use crate::store::{Storage, StoreError};

/// Minimum length of the denormalized shipping-address text.
const MIN_SHIPPING_ADDRESS_LEN: usize = 10;

/// Errors from checkout and status updates.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Checkout with no items.
    #[error("order must contain at least one item")]
    EmptyCart,

    /// An item carried a zero quantity.
    #[error("item quantity must be at least 1")]
    InvalidQuantity,

    /// Shipping-address text too short.
    #[error("shipping address must be at least 10 characters")]
    InvalidShippingAddress,

    /// Referenced address missing or owned by someone else.
    #[error("address not found")]
    AddressNotFound,

    /// Order id unresolved.
    #[error("order not found")]
    OrderNotFound,

    /// Storage operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Validated checkout request, ready for persistence.
#[derive(Debug, Clone)]
pub struct Checkout {
    pub items: Vec<OrderItem>,
    pub total_amount: Amount,
    pub address_id: Option<AddressId>,
    pub shipping_address: String,
}

/// Drives checkout and the admin status workflow against the store.
pub struct OrderService<'a> {
    store: &'a dyn Storage,
}

impl<'a> OrderService<'a> {
    #[must_use]
    pub const fn new(store: &'a dyn Storage) -> Self {
        Self { store }
    }

    /// Place an order for `user_id`.
    ///
    /// The snapshot is stored verbatim with `pending` status and payment.
    /// A referenced `address_id` must exist and belong to the buyer; the
    /// shipping text is still denormalized so deleting that address later
    /// leaves the order intact.
    ///
    /// # Errors
    ///
    /// Returns a validation variant for an empty cart, zero quantity or
    /// short shipping text, `OrderError::AddressNotFound` for a foreign or
    /// unknown address reference, or a store error.
    pub async fn checkout(&self, user_id: UserId, checkout: Checkout) -> Result<Order, OrderError> {
        if checkout.items.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        if checkout.items.iter().any(|item| item.quantity == 0) {
            return Err(OrderError::InvalidQuantity);
        }

        let shipping_address = checkout.shipping_address.trim().to_owned();
        if shipping_address.chars().count() < MIN_SHIPPING_ADDRESS_LEN {
            return Err(OrderError::InvalidShippingAddress);
        }

        if let Some(address_id) = checkout.address_id {
            let owned = self
                .store
                .address(address_id)
                .await?
                .is_some_and(|a| a.user_id == user_id);
            if !owned {
                return Err(OrderError::AddressNotFound);
            }
        }

        let order = self
            .store
            .create_order(NewOrder {
                user_id,
                items: checkout.items,
                total_amount: checkout.total_amount,
                address_id: checkout.address_id,
                shipping_address,
            })
            .await?;

        tracing::info!(order_id = %order.id, user_id = %user_id, "order placed");
        Ok(order)
    }

    /// Replace an order's lifecycle status (admin workflow).
    ///
    /// Any status may follow any other.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::OrderNotFound` if the id does not resolve.
    pub async fn set_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, OrderError> {
        match self.store.update_order_status(id, status).await {
            Ok(order) => {
                tracing::info!(order_id = %order.id, status = %order.status, "order status updated");
                Ok(order)
            }
            Err(StoreError::NotFound) => Err(OrderError::OrderNotFound),
            Err(e) => Err(e.into()),
        }
    }
}
