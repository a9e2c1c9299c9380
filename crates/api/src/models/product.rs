//! Product domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use charkha_core::{Amount, ProductCategory, ProductId};

/// A catalog entry.
///
/// Publicly readable; created, updated and deleted only by admin users.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Amount,
    /// Image reference (URL or asset path).
    pub image: String,
    pub category: ProductCategory,
    /// Available sizes; always non-empty.
    pub sizes: Vec<String>,
    pub in_stock: bool,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

/// Validated input for creating a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Amount,
    pub image: String,
    pub category: ProductCategory,
    pub sizes: Vec<String>,
    pub in_stock: bool,
    pub featured: bool,
}

/// Validated partial update for a product. `None` fields are untouched.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Amount>,
    pub image: Option<String>,
    pub category: Option<ProductCategory>,
    pub sizes: Option<Vec<String>>,
    pub in_stock: Option<bool>,
    pub featured: Option<bool>,
}
