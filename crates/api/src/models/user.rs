//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use charkha_core::{Email, OtpCode, Phone, UserId};

/// A storefront user.
///
/// Identity is anchored on the unique phone number. A user is fully
/// registered iff `name` is non-null; new users are created with null
/// name/email on their first OTP request and complete the profile after
/// verification. Users are never deleted.
///
/// Deliberately NOT `Serialize`: the OTP fields must never reach a response
/// payload, so the only serializable view is [`UserResponse`].
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Phone number (unique across users).
    pub phone: Phone,
    /// Display name; `None` until profile completion.
    pub name: Option<String>,
    /// Optional email address.
    pub email: Option<Email>,
    /// Admin role flag (seeded, never settable through the API).
    pub is_admin: bool,
    /// Outstanding OTP code, if one has been issued and not yet used.
    pub otp_code: Option<OtpCode>,
    /// Expiry of the outstanding OTP.
    pub otp_expires_at: Option<DateTime<Utc>>,
    /// How many OTPs have been issued since the last successful login.
    pub otp_attempts: u32,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whether the profile has been completed.
    #[must_use]
    pub const fn is_registered(&self) -> bool {
        self.name.is_some()
    }
}

/// The wire representation of a user.
///
/// Strips the OTP fields; everything else is camelCase to match the client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub phone: Phone,
    pub name: Option<String>,
    pub email: Option<Email>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            phone: user.phone.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}
