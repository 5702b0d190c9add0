//! Category and product listing endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use product_grid_core::Category;

use crate::extract::WixInstance;
use crate::services::catalog::ProductPage;
use crate::state::AppState;

/// Pagination query parameters.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// List categories for the requesting tenant.
///
/// # Route
///
/// `GET /api/categories`
pub async fn categories(
    State(state): State<AppState>,
    instance: WixInstance,
) -> Json<Vec<Category>> {
    Json(
        state
            .catalog()
            .list_categories(instance.site_id.as_ref())
            .await,
    )
}

/// List products across all categories.
///
/// # Route
///
/// `GET /api/products`
pub async fn products(
    State(state): State<AppState>,
    instance: WixInstance,
    Query(query): Query<PageQuery>,
) -> Json<ProductPage> {
    list(state, instance, "all", query).await
}

/// List products in one category.
///
/// # Route
///
/// `GET /api/products/{category}`
pub async fn products_by_category(
    State(state): State<AppState>,
    instance: WixInstance,
    Path(category): Path<String>,
    Query(query): Query<PageQuery>,
) -> Json<ProductPage> {
    list(state, instance, &category, query).await
}

async fn list(
    state: AppState,
    instance: WixInstance,
    category: &str,
    query: PageQuery,
) -> Json<ProductPage> {
    Json(
        state
            .catalog()
            .list_products(
                instance.site_id.as_ref(),
                category,
                query.page,
                query.limit,
                &mut <rand::rngs::StdRng as rand::SeedableRng>::from_os_rng(),
            )
            .await,
    )
}
