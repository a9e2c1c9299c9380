//! Address domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use charkha_core::{AddressId, Pincode, UserId};

/// A saved shipping address.
///
/// Belongs to exactly one user; at most one address per user carries the
/// default flag (enforced by the store). Deleting the default leaves the
/// user with zero defaults - no sibling is auto-promoted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: AddressId,
    pub user_id: UserId,
    /// Short label like "Home" or "Office".
    pub label: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: Pincode,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

/// Validated input for creating an address.
#[derive(Debug, Clone)]
pub struct NewAddress {
    pub label: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: Pincode,
    pub is_default: bool,
}

/// Validated partial update for an address. `None` fields are untouched.
#[derive(Debug, Clone, Default)]
pub struct AddressPatch {
    pub label: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<Option<String>>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<Pincode>,
    pub is_default: Option<bool>,
}
