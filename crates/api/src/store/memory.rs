//! In-memory store.
//!
//! All four tables live behind a single `tokio::sync::RwLock`, so every
//! invariant-preserving read-modify-write (OTP verify-and-clear, default
//! address exclusivity) holds the write guard for its whole sequence and is
//! atomic under the multi-threaded runtime. This is the process-local
//! equivalent of the row-locked transactions a relational backend would use.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use charkha_core::{AddressId, Email, OrderId, OrderStatus, OtpCode, Phone, ProductId, UserId};

use super::{Storage, StoreError, StoreResult, seed};
use crate::models::{
    Address, AddressPatch, NewAddress, NewOrder, NewProduct, Order, Product, ProductPatch, User,
};

#[derive(Default)]
pub(crate) struct Tables {
    pub(crate) users: HashMap<UserId, User>,
    pub(crate) addresses: HashMap<AddressId, Address>,
    pub(crate) products: HashMap<ProductId, Product>,
    pub(crate) orders: HashMap<OrderId, Order>,
}

/// In-memory [`Storage`] implementation.
pub struct MemStore {
    tables: RwLock<Tables>,
}

impl MemStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }

    /// Create a store pre-loaded with the admin user and starter catalog.
    #[must_use]
    pub fn with_seed_data() -> Self {
        let mut tables = Tables::default();
        seed::load(&mut tables);
        Self {
            tables: RwLock::new(tables),
        }
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Unset the default flag on every address owned by `user_id` except
/// `keep`. Callers must already hold the write guard.
fn clear_sibling_defaults(tables: &mut Tables, user_id: UserId, keep: Option<AddressId>) {
    for addr in tables.addresses.values_mut() {
        if addr.user_id == user_id && Some(addr.id) != keep {
            addr.is_default = false;
        }
    }
}

#[async_trait]
impl Storage for MemStore {
    // =========================================================================
    // Users
    // =========================================================================

    async fn user(&self, id: UserId) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn user_by_phone(&self, phone: &Phone) -> StoreResult<Option<User>> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|u| &u.phone == phone)
            .cloned())
    }

    async fn create_user(&self, phone: Phone) -> StoreResult<User> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.phone == phone) {
            return Err(StoreError::Conflict("phone already registered".to_owned()));
        }

        let user = User {
            id: UserId::generate(),
            phone,
            name: None,
            email: None,
            is_admin: false,
            otp_code: None,
            otp_expires_at: None,
            otp_attempts: 0,
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_profile(
        &self,
        id: UserId,
        name: String,
        email: Option<Email>,
    ) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        let user = tables.users.get_mut(&id).ok_or(StoreError::NotFound)?;
        user.name = Some(name);
        user.email = email;
        Ok(user.clone())
    }

    async fn set_otp(
        &self,
        phone: &Phone,
        code: OtpCode,
        expires_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .values_mut()
            .find(|u| &u.phone == phone)
            .ok_or(StoreError::NotFound)?;

        user.otp_code = Some(code);
        user.otp_expires_at = Some(expires_at);
        user.otp_attempts += 1;
        Ok(())
    }

    async fn verify_and_clear_otp(
        &self,
        phone: &Phone,
        code: &OtpCode,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<User>> {
        let mut tables = self.tables.write().await;
        let Some(user) = tables.users.values_mut().find(|u| &u.phone == phone) else {
            return Ok(None);
        };

        let matches = user.otp_code.as_ref() == Some(code)
            && user.otp_expires_at.is_some_and(|at| at > now);

        if !matches {
            // Stored OTP stays untouched; wrong and expired are
            // indistinguishable to the caller.
            return Ok(None);
        }

        user.otp_code = None;
        user.otp_expires_at = None;
        user.otp_attempts = 0;
        Ok(Some(user.clone()))
    }

    // =========================================================================
    // Addresses
    // =========================================================================

    async fn addresses_for(&self, user_id: UserId) -> StoreResult<Vec<Address>> {
        let tables = self.tables.read().await;
        let mut addresses: Vec<Address> = tables
            .addresses
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        addresses.sort_by(|a, b| {
            b.is_default
                .cmp(&a.is_default)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(addresses)
    }

    async fn address(&self, id: AddressId) -> StoreResult<Option<Address>> {
        Ok(self.tables.read().await.addresses.get(&id).cloned())
    }

    async fn create_address(&self, user_id: UserId, new: NewAddress) -> StoreResult<Address> {
        let mut tables = self.tables.write().await;

        if new.is_default {
            clear_sibling_defaults(&mut tables, user_id, None);
        }

        let address = Address {
            id: AddressId::generate(),
            user_id,
            label: new.label,
            address_line1: new.address_line1,
            address_line2: new.address_line2,
            city: new.city,
            state: new.state,
            pincode: new.pincode,
            is_default: new.is_default,
            created_at: Utc::now(),
        };
        tables.addresses.insert(address.id, address.clone());
        Ok(address)
    }

    async fn update_address(&self, id: AddressId, patch: AddressPatch) -> StoreResult<Address> {
        let mut tables = self.tables.write().await;

        let user_id = tables
            .addresses
            .get(&id)
            .map(|a| a.user_id)
            .ok_or(StoreError::NotFound)?;

        if patch.is_default == Some(true) {
            clear_sibling_defaults(&mut tables, user_id, Some(id));
        }

        let address = tables.addresses.get_mut(&id).ok_or(StoreError::NotFound)?;
        if let Some(label) = patch.label {
            address.label = label;
        }
        if let Some(line1) = patch.address_line1 {
            address.address_line1 = line1;
        }
        if let Some(line2) = patch.address_line2 {
            address.address_line2 = line2;
        }
        if let Some(city) = patch.city {
            address.city = city;
        }
        if let Some(state) = patch.state {
            address.state = state;
        }
        if let Some(pincode) = patch.pincode {
            address.pincode = pincode;
        }
        if let Some(is_default) = patch.is_default {
            address.is_default = is_default;
        }
        Ok(address.clone())
    }

    async fn delete_address(&self, id: AddressId) -> StoreResult<bool> {
        // No auto-promotion: deleting the default leaves zero defaults.
        Ok(self.tables.write().await.addresses.remove(&id).is_some())
    }

    // =========================================================================
    // Products
    // =========================================================================

    async fn products(&self) -> StoreResult<Vec<Product>> {
        let tables = self.tables.read().await;
        let mut products: Vec<Product> = tables.products.values().cloned().collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }

    async fn product(&self, id: ProductId) -> StoreResult<Option<Product>> {
        Ok(self.tables.read().await.products.get(&id).cloned())
    }

    async fn create_product(&self, new: NewProduct) -> StoreResult<Product> {
        let mut tables = self.tables.write().await;
        let product = Product {
            id: ProductId::generate(),
            name: new.name,
            description: new.description,
            price: new.price,
            image: new.image,
            category: new.category,
            sizes: new.sizes,
            in_stock: new.in_stock,
            featured: new.featured,
            created_at: Utc::now(),
        };
        tables.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update_product(&self, id: ProductId, patch: ProductPatch) -> StoreResult<Product> {
        let mut tables = self.tables.write().await;
        let product = tables.products.get_mut(&id).ok_or(StoreError::NotFound)?;

        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(description) = patch.description {
            product.description = description;
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(image) = patch.image {
            product.image = image;
        }
        if let Some(category) = patch.category {
            product.category = category;
        }
        if let Some(sizes) = patch.sizes {
            product.sizes = sizes;
        }
        if let Some(in_stock) = patch.in_stock {
            product.in_stock = in_stock;
        }
        if let Some(featured) = patch.featured {
            product.featured = featured;
        }
        Ok(product.clone())
    }

    async fn delete_product(&self, id: ProductId) -> StoreResult<bool> {
        Ok(self.tables.write().await.products.remove(&id).is_some())
    }

    // =========================================================================
    // Orders
    // =========================================================================

    async fn orders(&self) -> StoreResult<Vec<Order>> {
        let tables = self.tables.read().await;
        let mut orders: Vec<Order> = tables.orders.values().cloned().collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn order(&self, id: OrderId) -> StoreResult<Option<Order>> {
        Ok(self.tables.read().await.orders.get(&id).cloned())
    }

    async fn orders_for(&self, user_id: UserId) -> StoreResult<Vec<Order>> {
        let tables = self.tables.read().await;
        let mut orders: Vec<Order> = tables
            .orders
            .values()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn create_order(&self, new: NewOrder) -> StoreResult<Order> {
        let mut tables = self.tables.write().await;
        let order = Order {
            id: OrderId::generate(),
            user_id: new.user_id,
            items: new.items,
            total_amount: new.total_amount,
            status: OrderStatus::Pending,
            address_id: new.address_id,
            shipping_address: new.shipping_address,
            payment_status: charkha_core::PaymentStatus::Pending,
            created_at: Utc::now(),
        };
        tables.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn update_order_status(&self, id: OrderId, status: OrderStatus) -> StoreResult<Order> {
        let mut tables = self.tables.write().await;
        let order = tables.orders.get_mut(&id).ok_or(StoreError::NotFound)?;
        order.status = status;
        Ok(order.clone())
    }
}
