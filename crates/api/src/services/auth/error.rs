//! Auth service errors.

use thiserror::Error;

use charkha_core::{EmailError, OtpCodeError, PhoneError};

use super::token::TokenError;
use crate::store::StoreError;

/// Errors from OTP issuance, verification and profile completion.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Phone failed format validation.
    #[error(transparent)]
    InvalidPhone(#[from] PhoneError),

    /// OTP code failed format validation (before any store lookup).
    #[error(transparent)]
    InvalidOtpFormat(#[from] OtpCodeError),

    /// Display name failed validation.
    #[error("{0}")]
    InvalidName(String),

    /// Email failed format validation.
    #[error(transparent)]
    InvalidEmail(#[from] EmailError),

    /// Code mismatch or expiry; the two are deliberately not distinguished.
    #[error("invalid or expired OTP")]
    InvalidOrExpiredOtp,

    /// Profile operation on a user id that no longer resolves.
    #[error("user not found")]
    UserNotFound,

    /// Storage operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Credential signing failed.
    #[error(transparent)]
    Token(#[from] TokenError),
}
