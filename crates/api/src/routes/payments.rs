//! Payment routes.
//!
//! Capture is not wired to a provider yet; the endpoint exists so the
//! client's checkout flow has a stable URL to call.

use crate::error::ApiError;
use crate::middleware::CurrentUser;

/// Payment capture stub.
///
/// POST /api/payments/intent
///
/// # Errors
///
/// Always returns 501 until a payment provider is configured.
pub async fn create_intent(CurrentUser(_caller): CurrentUser) -> ApiError {
    ApiError::NotImplemented(
        "Payment integration not yet implemented. Please add Stripe/Razorpay API keys.".to_owned(),
    )
}
