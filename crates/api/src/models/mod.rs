//! Domain types.
//!
//! These are validated domain objects, separate from the wire DTOs the
//! route handlers accept. Input structs (`New*` / `*Patch`) are what the
//! store consumes after handler-side validation.

pub mod address;
pub mod order;
pub mod product;
pub mod user;

pub use address::{Address, AddressPatch, NewAddress};
pub use order::{NewOrder, Order, OrderItem};
pub use product::{NewProduct, Product, ProductPatch};
pub use user::{User, UserResponse};
