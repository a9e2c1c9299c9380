//! Address book routes.
//!
//! Strictly owner-scoped: a foreign or unknown id gets the same 404, so
//! the API never confirms that someone else's address exists.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Deserializer};

use charkha_core::{AddressId, Pincode};

use crate::error::{ApiError, Result};
use crate::middleware::CurrentUser;
use crate::models::{Address, AddressPatch, NewAddress};
use crate::state::AppState;

use super::parse_id;

fn non_empty(value: String, field: &str) -> Result<String> {
    let trimmed = value.trim().to_owned();
    if trimmed.is_empty() {
        return Err(ApiError::Validation(format!("{field} must not be empty")));
    }
    Ok(trimmed)
}

fn parse_pincode(raw: &str) -> Result<Pincode> {
    Pincode::parse(raw).map_err(|e| ApiError::Validation(format!("pincode: {e}")))
}

/// Distinguishes an absent field from an explicit `null`.
fn double_option<'de, T, D>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Request body for `POST /api/addresses`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressBody {
    pub label: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
    #[serde(default)]
    pub is_default: bool,
}

impl AddressBody {
    fn into_domain(self) -> Result<NewAddress> {
        Ok(NewAddress {
            label: non_empty(self.label, "label")?,
            address_line1: non_empty(self.address_line1, "addressLine1")?,
            address_line2: self.address_line2.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty()),
            city: non_empty(self.city, "city")?,
            state: non_empty(self.state, "state")?,
            pincode: parse_pincode(&self.pincode)?,
            is_default: self.is_default,
        })
    }
}

/// Request body for `PATCH /api/addresses/{id}`. Absent fields are left
/// untouched; `addressLine2: null` clears the line.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressPatchBody {
    pub label: Option<String>,
    pub address_line1: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub address_line2: Option<Option<String>>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub is_default: Option<bool>,
}

impl AddressPatchBody {
    fn into_domain(self) -> Result<AddressPatch> {
        Ok(AddressPatch {
            label: self.label.map(|v| non_empty(v, "label")).transpose()?,
            address_line1: self
                .address_line1
                .map(|v| non_empty(v, "addressLine1"))
                .transpose()?,
            address_line2: self
                .address_line2
                .map(|inner| inner.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())),
            city: self.city.map(|v| non_empty(v, "city")).transpose()?,
            state: self.state.map(|v| non_empty(v, "state")).transpose()?,
            pincode: self.pincode.as_deref().map(parse_pincode).transpose()?,
            is_default: self.is_default,
        })
    }
}

/// Resolve an id to an address owned by the caller, or 404.
async fn owned_address(state: &AppState, caller: &crate::middleware::AuthUser, raw_id: &str) -> Result<Address> {
    let id: AddressId = parse_id(raw_id, "Address")?;
    state
        .store()
        .address(id)
        .await?
        .filter(|a| a.user_id == caller.id)
        .ok_or_else(|| ApiError::NotFound("Address".to_owned()))
}

/// List the caller's addresses, default first, then newest first.
///
/// GET /api/addresses
///
/// # Errors
///
/// Returns 401 without a valid token.
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
) -> Result<Json<Vec<Address>>> {
    Ok(Json(state.store().addresses_for(caller.id).await?))
}

/// Create an address for the caller.
///
/// POST /api/addresses
///
/// Setting `isDefault` unsets every other default the caller has.
///
/// # Errors
///
/// Returns 400 for empty fields or a malformed pincode.
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Json(body): Json<AddressBody>,
) -> Result<(StatusCode, Json<Address>)> {
    let new = body.into_domain()?;
    let address = state.store().create_address(caller.id, new).await?;
    Ok((StatusCode::CREATED, Json(address)))
}

/// Partially update one of the caller's addresses.
///
/// PATCH /api/addresses/{id}
///
/// # Errors
///
/// Returns 404 for an unknown or foreign id, 400 for invalid fields.
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(raw_id): Path<String>,
    Json(body): Json<AddressPatchBody>,
) -> Result<Json<Address>> {
    let address = owned_address(&state, &caller, &raw_id).await?;
    let patch = body.into_domain()?;
    Ok(Json(state.store().update_address(address.id, patch).await?))
}

/// Delete one of the caller's addresses.
///
/// DELETE /api/addresses/{id}
///
/// Deleting the default leaves the caller with zero defaults; no sibling
/// is promoted.
///
/// # Errors
///
/// Returns 404 for an unknown or foreign id.
pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(raw_id): Path<String>,
) -> Result<StatusCode> {
    let address = owned_address(&state, &caller, &raw_id).await?;
    state.store().delete_address(address.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
