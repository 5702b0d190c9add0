//! Commerce proxy: live Wix Stores reads with mock fallback.
//!
//! Every upstream failure (network error, auth rejection, empty result,
//! missing token) is recovered locally by substituting fallback/mock data;
//! callers always receive a populated response.

use rand::Rng;
use serde::Serialize;

use product_grid_core::{Category, PlanLimits, Product, SiteId};

use crate::services::mock;
use crate::services::tokens::TokenService;
use crate::store::TenantStore;
use crate::wix::WixStoresClient;

/// Default page size when the request does not specify one.
const DEFAULT_PAGE_LIMIT: u32 = 12;

/// Pagination block of a product listing response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: usize,
    pub has_more: bool,
}

/// Plan block of a product listing response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanInfo {
    pub plan: String,
    pub limits: PlanLimits,
}

/// One page of products plus pagination and plan metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub pagination: Pagination,
    pub plan_info: PlanInfo,
}

/// Proxies catalog reads for a tenant, falling back to mock data.
#[derive(Clone)]
pub struct CatalogService {
    wix: WixStoresClient,
    tokens: TokenService,
    store: TenantStore,
}

impl CatalogService {
    /// Create a new catalog service.
    #[must_use]
    pub fn new(wix: WixStoresClient, tokens: TokenService, store: TenantStore) -> Self {
        Self { wix, tokens, store }
    }

    /// List categories for a tenant.
    ///
    /// With a valid token the live collections are fetched; on any error or
    /// an empty result the fixed fallback set is returned instead. Whatever
    /// is returned is also cached on the tenant record.
    pub async fn list_categories(&self, site_id: Option<&SiteId>) -> Vec<Category> {
        let mut categories = Vec::new();

        if let Some(site_id) = site_id
            && let Some(token) = self.tokens.ensure_valid(site_id).await
        {
            match self.wix.list_collections(&token, site_id.as_str()).await {
                Ok(live) => categories = live,
                Err(err) => {
                    tracing::info!(site = %site_id, error = %err,
                        "Wix collections unavailable, using fallback");
                }
            }
        }

        if categories.is_empty() {
            categories = mock::fallback_categories();
        }

        if let Some(site_id) = site_id {
            let cached = categories.clone();
            self.store
                .update(site_id, |record| record.categories = cached);
        }

        categories
    }

    /// List one page of products for a tenant.
    ///
    /// The requested `limit` is clamped to the plan's page cap. Upstream
    /// failures and empty results are replaced by mock products; the tenant's
    /// view counter is incremented either way.
    pub async fn list_products(
        &self,
        site_id: Option<&SiteId>,
        category: &str,
        page: Option<u32>,
        limit: Option<u32>,
        rng: &mut impl Rng,
    ) -> ProductPage {
        let page = page.unwrap_or(1).max(1);
        let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);

        let record = site_id.and_then(|site_id| self.store.get(site_id));
        let plan = record.map_or_else(
            || "free".to_string(),
            |record| record.settings.plan,
        );
        let limits = PlanLimits::for_plan(&plan);
        let max_products = limit.min(limits.max_products_per_page);

        let mut products = Vec::new();
        if let Some(site_id) = site_id
            && let Some(token) = self.tokens.ensure_valid(site_id).await
        {
            let collection_id = (category != "all").then_some(category);
            match self
                .wix
                .list_products(
                    &token,
                    site_id.as_str(),
                    max_products,
                    (page - 1) * max_products,
                    collection_id,
                )
                .await
            {
                Ok(live) => products = live,
                Err(err) => {
                    tracing::info!(site = %site_id, error = %err,
                        "Wix products unavailable, using mock data");
                }
            }
        }

        if products.is_empty() {
            products = mock::mock_products(category, max_products, page, rng);
        }

        if let Some(site_id) = site_id {
            self.store.update(site_id, |record| record.counters.views += 1);
        }

        let total = products.len();
        ProductPage {
            pagination: Pagination {
                page,
                limit: max_products,
                total,
                has_more: total == max_products as usize,
            },
            plan_info: PlanInfo { plan, limits },
            products,
        }
    }
}
