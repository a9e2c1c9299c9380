//! Catalog routes: public reads, admin-only writes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use charkha_core::{Amount, ProductCategory, ProductId};

use crate::error::{ApiError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{NewProduct, Product, ProductPatch};
use crate::state::AppState;

use super::parse_id;

/// Minimum description length for a catalog entry.
const MIN_DESCRIPTION_LEN: usize = 10;

fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("name must not be empty".to_owned()));
    }
    Ok(name.to_owned())
}

fn validate_description(description: &str) -> Result<String> {
    let description = description.trim();
    if description.chars().count() < MIN_DESCRIPTION_LEN {
        return Err(ApiError::Validation(
            "description must be at least 10 characters".to_owned(),
        ));
    }
    Ok(description.to_owned())
}

fn validate_image(image: &str) -> Result<String> {
    let image = image.trim();
    if image.is_empty() {
        return Err(ApiError::Validation("image must not be empty".to_owned()));
    }
    Ok(image.to_owned())
}

fn validate_sizes(sizes: Vec<String>) -> Result<Vec<String>> {
    if sizes.is_empty() || sizes.iter().any(|s| s.trim().is_empty()) {
        return Err(ApiError::Validation(
            "sizes must be a non-empty list of non-empty values".to_owned(),
        ));
    }
    Ok(sizes)
}

const fn default_in_stock() -> bool {
    true
}

/// Request body for `POST /api/products`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductBody {
    pub name: String,
    pub description: String,
    pub price: Amount,
    pub image: String,
    pub category: ProductCategory,
    pub sizes: Vec<String>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub featured: bool,
}

impl ProductBody {
    fn into_domain(self) -> Result<NewProduct> {
        Ok(NewProduct {
            name: validate_name(&self.name)?,
            description: validate_description(&self.description)?,
            price: self.price,
            image: validate_image(&self.image)?,
            category: self.category,
            sizes: validate_sizes(self.sizes)?,
            in_stock: self.in_stock,
            featured: self.featured,
        })
    }
}

/// Request body for `PATCH /api/products/{id}`. Absent fields are left
/// untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatchBody {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Amount>,
    pub image: Option<String>,
    pub category: Option<ProductCategory>,
    pub sizes: Option<Vec<String>>,
    pub in_stock: Option<bool>,
    pub featured: Option<bool>,
}

impl ProductPatchBody {
    fn into_domain(self) -> Result<ProductPatch> {
        Ok(ProductPatch {
            name: self.name.as_deref().map(validate_name).transpose()?,
            description: self
                .description
                .as_deref()
                .map(validate_description)
                .transpose()?,
            price: self.price,
            image: self.image.as_deref().map(validate_image).transpose()?,
            category: self.category,
            sizes: self.sizes.map(validate_sizes).transpose()?,
            in_stock: self.in_stock,
            featured: self.featured,
        })
    }
}

/// List the catalog, newest first.
///
/// GET /api/products
///
/// # Errors
///
/// Returns 500 on a store failure.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    Ok(Json(state.store().products().await?))
}

/// Fetch one catalog entry.
///
/// GET /api/products/{id}
///
/// # Errors
///
/// Returns 404 for an unknown or malformed id.
pub async fn show(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Product>> {
    let id: ProductId = parse_id(&raw_id, "Product")?;
    let product = state
        .store()
        .product(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product".to_owned()))?;
    Ok(Json(product))
}

/// Create a catalog entry.
///
/// POST /api/products
///
/// # Errors
///
/// Returns 403 without the admin role, 400 for invalid fields.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(body): Json<ProductBody>,
) -> Result<(StatusCode, Json<Product>)> {
    let new = body.into_domain()?;
    let product = state.store().create_product(new).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Partially update a catalog entry.
///
/// PATCH /api/products/{id}
///
/// # Errors
///
/// Returns 403 without the admin role, 404 for an unknown id, 400 for
/// invalid fields.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(raw_id): Path<String>,
    Json(body): Json<ProductPatchBody>,
) -> Result<Json<Product>> {
    let id: ProductId = parse_id(&raw_id, "Product")?;
    let patch = body.into_domain()?;
    match state.store().update_product(id, patch).await {
        Ok(product) => Ok(Json(product)),
        Err(crate::store::StoreError::NotFound) => Err(ApiError::NotFound("Product".to_owned())),
        Err(e) => Err(e.into()),
    }
}

/// Delete a catalog entry.
///
/// DELETE /api/products/{id}
///
/// Orders placed earlier keep their snapshot of the product.
///
/// # Errors
///
/// Returns 403 without the admin role, 404 for an unknown id.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(raw_id): Path<String>,
) -> Result<StatusCode> {
    let id: ProductId = parse_id(&raw_id, "Product")?;
    if !state.store().delete_product(id).await? {
        return Err(ApiError::NotFound("Product".to_owned()));
    }
    Ok(StatusCode::NO_CONTENT)
}
