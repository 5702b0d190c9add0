//! OAuth token lifecycle per tenant: store, read, refresh on demand.
//!
//! Refresh failures never propagate; callers treat "no token" as "operate
//! unauthenticated", which routes them onto the mock-data fallback path.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use chrono::Utc;
use tokio::sync::Mutex;

use product_grid_core::{SiteId, TokenRecord};

use crate::store::TenantStore;
use crate::wix::{TokenGrant, WixOAuthClient};

/// Manages per-tenant OAuth tokens on top of the tenant store.
#[derive(Clone)]
pub struct TokenService {
    inner: Arc<TokenServiceInner>,
}

struct TokenServiceInner {
    store: TenantStore,
    oauth: WixOAuthClient,
    /// Per-site guards serializing concurrent refresh attempts, so two
    /// expired-token requests cannot both spend the same refresh token.
    refresh_locks: StdMutex<HashMap<SiteId, Arc<Mutex<()>>>>,
}

impl TokenService {
    /// Create a new token service over the given store and OAuth client.
    #[must_use]
    pub fn new(store: TenantStore, oauth: WixOAuthClient) -> Self {
        Self {
            inner: Arc::new(TokenServiceInner {
                store,
                oauth,
                refresh_locks: StdMutex::new(HashMap::new()),
            }),
        }
    }

    /// Overwrite the tenant's token record from a provider grant, creating
    /// the tenant record if absent.
    pub fn store(&self, site_id: &SiteId, grant: TokenGrant) {
        let record = TokenRecord::from_grant(
            grant.access_token,
            grant.refresh_token,
            grant.expires_in,
            Utc::now(),
        );
        self.inner.store.put_token(site_id, record);
    }

    /// Current token record for a tenant; pure read.
    #[must_use]
    pub fn get(&self, site_id: &SiteId) -> Option<TokenRecord> {
        self.inner.store.token(site_id)
    }

    /// Return a currently-valid access token, refreshing once if needed.
    ///
    /// Returns `None` when the tenant has no token, the record has no refresh
    /// token, or the refresh call fails; the failed record is retained and
    /// retried on the next call.
    pub async fn ensure_valid(&self, site_id: &SiteId) -> Option<String> {
        let record = self.inner.store.token(site_id)?;
        if record.is_valid_at(Utc::now()) {
            return Some(record.access_token);
        }
        record.refresh_token.as_ref()?;

        // Single-flight per site: the second concurrent caller waits here and
        // then picks up the first caller's fresh token on the re-check.
        let guard = self.refresh_lock(site_id);
        let _held = guard.lock().await;

        let record = self.inner.store.token(site_id)?;
        if record.is_valid_at(Utc::now()) {
            return Some(record.access_token);
        }
        let refresh_token = record.refresh_token?;

        match self.inner.oauth.refresh_token(&refresh_token).await {
            Ok(grant) => {
                let fresh = TokenRecord::from_grant(
                    grant.access_token.clone(),
                    grant.refresh_token,
                    grant.expires_in,
                    Utc::now(),
                );
                self.inner.store.put_token(site_id, fresh);
                Some(grant.access_token)
            }
            Err(err) => {
                tracing::warn!(site = %site_id, error = %err, "token refresh failed");
                None
            }
        }
    }

    fn refresh_lock(&self, site_id: &SiteId) -> Arc<Mutex<()>> {
        let mut locks = self
            .inner
            .refresh_locks
            .lock()
            .expect("refresh lock map poisoned");
        locks.entry(site_id.clone()).or_default().clone()
    }
}
