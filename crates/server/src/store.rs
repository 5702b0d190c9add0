//! In-memory tenant store.
//!
//! An explicit get/put/delete store injected through `AppState` rather than a
//! module-level global. Nothing here survives a process restart.
//!
//! The map lives behind a `std::sync::RwLock` that is never held across an
//! `await`; reads clone the record out so handlers work on owned data.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use product_grid_core::{Category, Product, SiteId, TenantSettings, TokenRecord};

/// Rolling view/click/conversion counters kept on the tenant record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageCounters {
    pub views: u64,
    pub clicks: u64,
    pub conversions: u64,
}

/// Everything the server knows about one installed site.
#[derive(Debug, Clone, Default)]
pub struct TenantRecord {
    pub settings: TenantSettings,
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub counters: UsageCounters,
    pub auth: Option<TokenRecord>,
    pub installed_at: Option<DateTime<Utc>>,
    pub instance_id: Option<String>,
}

impl TenantRecord {
    /// Record created by the install webhook.
    #[must_use]
    pub fn installed(instance_id: Option<String>, installed_at: DateTime<Utc>) -> Self {
        Self {
            instance_id,
            installed_at: Some(installed_at),
            ..Self::default()
        }
    }
}

/// In-memory mapping from site id to tenant record.
#[derive(Clone, Default)]
pub struct TenantStore {
    inner: Arc<RwLock<HashMap<SiteId, TenantRecord>>>,
}

impl TenantStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a clone of a tenant record.
    #[must_use]
    pub fn get(&self, site_id: &SiteId) -> Option<TenantRecord> {
        self.inner
            .read()
            .expect("tenant store lock poisoned")
            .get(site_id)
            .cloned()
    }

    /// Insert the default record for a site if absent; returns a clone of the
    /// stored record either way. This is the lazy creation performed for every
    /// `/api/*` request that carries a site id.
    pub fn ensure(&self, site_id: &SiteId) -> TenantRecord {
        let mut map = self.inner.write().expect("tenant store lock poisoned");
        map.entry(site_id.clone()).or_default().clone()
    }

    /// Replace a tenant record wholesale.
    pub fn put(&self, site_id: SiteId, record: TenantRecord) {
        let mut map = self.inner.write().expect("tenant store lock poisoned");
        map.insert(site_id, record);
    }

    /// Delete a tenant record. Returns whether one existed.
    pub fn delete(&self, site_id: &SiteId) -> bool {
        let mut map = self.inner.write().expect("tenant store lock poisoned");
        map.remove(site_id).is_some()
    }

    /// Mutate an existing tenant record in place. Returns `false` (and does
    /// nothing) when the site is unknown.
    pub fn update(&self, site_id: &SiteId, f: impl FnOnce(&mut TenantRecord)) -> bool {
        let mut map = self.inner.write().expect("tenant store lock poisoned");
        match map.get_mut(site_id) {
            Some(record) => {
                f(record);
                true
            }
            None => false,
        }
    }

    /// Mutate a tenant record, creating the default record first if absent.
    pub fn update_or_default(&self, site_id: &SiteId, f: impl FnOnce(&mut TenantRecord)) {
        let mut map = self.inner.write().expect("tenant store lock poisoned");
        f(map.entry(site_id.clone()).or_default());
    }

    /// Get a clone of a tenant's token record.
    #[must_use]
    pub fn token(&self, site_id: &SiteId) -> Option<TokenRecord> {
        self.inner
            .read()
            .expect("tenant store lock poisoned")
            .get(site_id)
            .and_then(|record| record.auth.clone())
    }

    /// Store a token record, creating the tenant if absent.
    pub fn put_token(&self, site_id: &SiteId, token: TokenRecord) {
        self.update_or_default(site_id, |record| record.auth = Some(token));
    }
}
