//! Shared application state.

use std::sync::Arc;

use crate::config::ApiConfig;
use crate::services::auth::TokenService;
use crate::services::sms::OtpSender;
use crate::store::Storage;

/// Application state shared across all request handlers.
///
/// Cheap to clone (a single `Arc`); axum clones it per request.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    store: Arc<dyn Storage>,
    tokens: TokenService,
    sms: Arc<dyn OtpSender>,
}

impl AppState {
    /// Assemble the state from its components, built once in `main`.
    #[must_use]
    pub fn new(config: ApiConfig, store: Arc<dyn Storage>, sms: Arc<dyn OtpSender>) -> Self {
        let tokens = TokenService::new(&config.jwt_secret);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                tokens,
                sms,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn store(&self) -> &dyn Storage {
        self.inner.store.as_ref()
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenService {
        &self.inner.tokens
    }

    #[must_use]
    pub fn sms(&self) -> &dyn OtpSender {
        self.inner.sms.as_ref()
    }
}
