//! Application state shared across handlers.

use std::sync::Arc;

use crate::analytics::AnalyticsStore;
use crate::config::AppConfig;
use crate::services::catalog::CatalogService;
use crate::services::tokens::TokenService;
use crate::store::TenantStore;
use crate::wix::{WixOAuthClient, WixStoresClient};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// in-memory stores, API clients, and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    tenants: TenantStore,
    analytics: AnalyticsStore,
    oauth: WixOAuthClient,
    tokens: TokenService,
    catalog: CatalogService,
}

impl AppState {
    /// Create a new application state from configuration.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        let tenants = TenantStore::new();
        let analytics = AnalyticsStore::new();
        let oauth = WixOAuthClient::new(&config.wix);
        let tokens = TokenService::new(tenants.clone(), oauth.clone());
        let catalog = CatalogService::new(
            WixStoresClient::new(&config.wix),
            tokens.clone(),
            tenants.clone(),
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                tenants,
                analytics,
                oauth,
                tokens,
                catalog,
            }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a reference to the tenant store.
    #[must_use]
    pub fn tenants(&self) -> &TenantStore {
        &self.inner.tenants
    }

    /// Get a reference to the analytics store.
    #[must_use]
    pub fn analytics(&self) -> &AnalyticsStore {
        &self.inner.analytics
    }

    /// Get a reference to the OAuth client.
    #[must_use]
    pub fn oauth(&self) -> &WixOAuthClient {
        &self.inner.oauth
    }

    /// Get a reference to the token lifecycle service.
    #[must_use]
    pub fn tokens(&self) -> &TokenService {
        &self.inner.tokens
    }

    /// Get a reference to the catalog proxy.
    #[must_use]
    pub fn catalog(&self) -> &CatalogService {
        &self.inner.catalog
    }
}
