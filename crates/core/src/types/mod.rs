//! Core domain types.

pub mod amount;
pub mod email;
pub mod id;
pub mod otp;
pub mod phone;
pub mod pincode;
pub mod status;

pub use amount::{Amount, AmountError};
pub use email::{Email, EmailError};
pub use id::{AddressId, OrderId, ProductId, UserId};
pub use otp::{OtpCode, OtpCodeError};
pub use phone::{Phone, PhoneError};
pub use pincode::{Pincode, PincodeError};
pub use status::{OrderStatus, PaymentStatus, ProductCategory};
