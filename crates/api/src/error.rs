//! Unified error handling with Sentry integration.
//!
//! Provides a unified `ApiError` type that captures server-side failures to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, ApiError>`; every error renders as a `{"message": ...}` JSON
//! body so the client sees one consistent shape.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::services::auth::AuthError;
use crate::services::orders::OrderError;
use crate::store::StoreError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed input; the message identifies the offending field.
    #[error("validation error: {0}")]
    Validation(String),

    /// Entity id unresolved.
    #[error("{0} not found")]
    NotFound(String),

    /// No credential was presented.
    #[error("authentication required")]
    Unauthenticated,

    /// A credential was presented but failed the signature/expiry check.
    #[error("invalid or expired token")]
    InvalidCredential,

    /// Authenticated but lacking the admin role.
    #[error("admin access required")]
    Forbidden,

    /// OTP mismatch or expiry - deliberately indistinguishable.
    #[error("invalid or expired OTP")]
    InvalidOrExpiredOtp,

    /// Domain-invariant violation (e.g., duplicate phone).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Stubbed feature (payment capture).
    #[error("{0}")]
    NotImplemented(String),

    /// Storage operation failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) | Self::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
            Self::Unauthenticated | Self::InvalidCredential | Self::InvalidOrExpiredOtp => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Conflict(_) | Self::Store(StoreError::Conflict(_)) => StatusCode::CONFLICT,
            Self::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Internal(_) => "Internal server error".to_string(),
            Self::Unauthenticated => "Authentication required".to_string(),
            Self::InvalidCredential => "Invalid or expired token".to_string(),
            Self::Forbidden => "Admin access required".to_string(),
            Self::InvalidOrExpiredOtp => "Invalid or expired OTP".to_string(),
            Self::Store(StoreError::NotFound) => "Not found".to_string(),
            _ => self.to_string(),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidPhone(e) => Self::Validation(format!("phone: {e}")),
            AuthError::InvalidOtpFormat(e) => Self::Validation(format!("otpCode: {e}")),
            AuthError::InvalidName(msg) => Self::Validation(format!("name: {msg}")),
            AuthError::InvalidEmail(e) => Self::Validation(format!("email: {e}")),
            AuthError::InvalidOrExpiredOtp => Self::InvalidOrExpiredOtp,
            AuthError::UserNotFound => Self::NotFound("User".to_owned()),
            AuthError::Store(e) => Self::Store(e),
            AuthError::Token(e) => Self::Internal(format!("token signing failed: {e}")),
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::EmptyCart | OrderError::InvalidQuantity | OrderError::InvalidShippingAddress => {
                Self::Validation(err.to_string())
            }
            OrderError::AddressNotFound => Self::NotFound("Address".to_owned()),
            OrderError::OrderNotFound => Self::NotFound("Order".to_owned()),
            OrderError::Store(e) => Self::Store(e),
        }
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn get_status(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            get_status(ApiError::Validation("phone".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(ApiError::NotFound("Product".to_owned())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(ApiError::Unauthenticated),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(ApiError::InvalidCredential),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(get_status(ApiError::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(
            get_status(ApiError::InvalidOrExpiredOtp),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(ApiError::Conflict("phone".to_owned())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(ApiError::NotImplemented("payments".to_owned())),
            StatusCode::NOT_IMPLEMENTED
        );
        assert_eq!(
            get_status(ApiError::Internal("boom".to_owned())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(ApiError::Store(StoreError::NotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(ApiError::Store(StoreError::Conflict("x".to_owned()))),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_not_found_display() {
        let err = ApiError::NotFound("Product".to_owned());
        assert_eq!(err.to_string(), "Product not found");
    }
}
