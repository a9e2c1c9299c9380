//! Storage layer.
//!
//! The [`Storage`] trait is the contract every backing engine must honor;
//! [`MemStore`] is the in-memory implementation used in this deployment.
//! Handlers receive the store through [`crate::state::AppState`] as a
//! dependency-injected `Arc<dyn Storage>`, constructed once at process
//! start with seed data.
//!
//! # Atomicity obligations
//!
//! Two operations are read-modify-write sequences that the contract requires
//! to be atomic per affected key, not left to caller discipline:
//!
//! - [`Storage::verify_and_clear_otp`] - match-then-clear must not lose an
//!   update to a concurrent issuance for the same phone.
//! - Default-address exclusivity - [`Storage::create_address`] and
//!   [`Storage::update_address`] with `is_default = true` must unset every
//!   sibling and persist the record as one unit per owning user.
//!
//! A relational backend would express these as row-locked transactions;
//! `MemStore` holds a single write guard across each sequence.

pub mod memory;
mod seed;

pub use memory::MemStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use charkha_core::{AddressId, OrderId, OrderStatus, OtpCode, Phone, ProductId, UserId};

use crate::models::{
    Address, AddressPatch, NewAddress, NewOrder, NewProduct, Order, Product, ProductPatch, User,
};

/// Errors surfaced by storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Uniqueness-like invariant violation (e.g., duplicate phone).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Result type alias for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// The storage contract: CRUD plus the invariant-preserving operations.
///
/// See the module docs for the atomicity obligations on implementors.
#[async_trait]
pub trait Storage: Send + Sync {
    // =========================================================================
    // Users
    // =========================================================================

    /// Get a user by ID.
    async fn user(&self, id: UserId) -> StoreResult<Option<User>>;

    /// Get a user by phone number.
    async fn user_by_phone(&self, phone: &Phone) -> StoreResult<Option<User>>;

    /// Create a user with null name/email and no admin role.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the phone is already registered.
    async fn create_user(&self, phone: Phone) -> StoreResult<User>;

    /// Set name and optional email on a user's profile.
    ///
    /// Idempotent; may be called again later to edit the profile.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the user does not exist.
    async fn update_profile(
        &self,
        id: UserId,
        name: String,
        email: Option<charkha_core::Email>,
    ) -> StoreResult<User>;

    /// Attach a freshly issued OTP to the user owning `phone` and bump the
    /// attempt counter.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no user owns the phone.
    async fn set_otp(
        &self,
        phone: &Phone,
        code: OtpCode,
        expires_at: DateTime<Utc>,
    ) -> StoreResult<()>;

    /// Atomically verify an OTP and clear it on success (single use).
    ///
    /// Returns `Ok(Some(user))` only when the stored code matches exactly
    /// AND the stored expiry is after `now`; the code, expiry and attempt
    /// counter are cleared in the same step. Any mismatch, expiry, or
    /// missing user yields `Ok(None)` with the stored state untouched -
    /// wrong and expired codes are indistinguishable to callers.
    async fn verify_and_clear_otp(
        &self,
        phone: &Phone,
        code: &OtpCode,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<User>>;

    // =========================================================================
    // Addresses
    // =========================================================================

    /// All addresses owned by a user: default first, then newest first.
    async fn addresses_for(&self, user_id: UserId) -> StoreResult<Vec<Address>>;

    /// Get an address by ID.
    async fn address(&self, id: AddressId) -> StoreResult<Option<Address>>;

    /// Create an address. If `is_default` is set, every sibling default is
    /// unset in the same atomic step.
    async fn create_address(&self, user_id: UserId, new: NewAddress) -> StoreResult<Address>;

    /// Apply a partial update. A patch setting `is_default = true` unsets
    /// every sibling default in the same atomic step.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the address does not exist.
    async fn update_address(&self, id: AddressId, patch: AddressPatch) -> StoreResult<Address>;

    /// Delete an address. Returns `true` if it existed. Deleting the
    /// current default leaves the owner with zero defaults.
    async fn delete_address(&self, id: AddressId) -> StoreResult<bool>;

    // =========================================================================
    // Products
    // =========================================================================

    /// All catalog entries, newest first.
    async fn products(&self) -> StoreResult<Vec<Product>>;

    /// Get a product by ID.
    async fn product(&self, id: ProductId) -> StoreResult<Option<Product>>;

    /// Create a product.
    async fn create_product(&self, new: NewProduct) -> StoreResult<Product>;

    /// Apply a partial update.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the product does not exist.
    async fn update_product(&self, id: ProductId, patch: ProductPatch) -> StoreResult<Product>;

    /// Delete a product. Returns `true` if it existed.
    async fn delete_product(&self, id: ProductId) -> StoreResult<bool>;

    // =========================================================================
    // Orders
    // =========================================================================

    /// All orders, newest first (admin view).
    async fn orders(&self) -> StoreResult<Vec<Order>>;

    /// Get an order by ID.
    async fn order(&self, id: OrderId) -> StoreResult<Option<Order>>;

    /// Orders owned by a user, newest first.
    async fn orders_for(&self, user_id: UserId) -> StoreResult<Vec<Order>>;

    /// Create an order with status `pending` / payment `pending`. The item
    /// snapshot and total are persisted verbatim and never recomputed.
    async fn create_order(&self, new: NewOrder) -> StoreResult<Order>;

    /// Replace an order's lifecycle status. Any status may replace any
    /// other; no transition matrix is enforced.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the order does not exist.
    async fn update_order_status(&self, id: OrderId, status: OrderStatus) -> StoreResult<Order>;
}
