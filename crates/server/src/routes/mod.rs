//! HTTP route handlers for the app backend.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                            - Service descriptor
//! GET  /health                      - Redirect to /api/health
//! GET  /dashboard                   - Static status page
//! GET  /widget                      - Widget script
//! GET  /widget/mobile               - Widget script (mobile alias)
//!
//! # OAuth
//! GET  /oauth/start                 - Redirect to the Wix installer
//! GET  /oauth/callback              - Exchange code, store tokens
//!
//! # API (tenant resolved from X-Wix-* headers or query params)
//! GET  /api/health                  - Health check
//! GET  /api/auth/status             - Token status for a site
//! GET  /api/settings                - Settings + plan limits + usage
//! POST /api/settings                - Merge-patch settings
//! GET  /api/categories              - Categories (proxy or fallback)
//! GET  /api/products                - Products, all categories
//! GET  /api/products/{category}     - Products in one category
//! POST /api/enhance-product         - Marketing phrase for a product
//! POST /api/analytics               - Record a widget event
//! GET  /api/analytics/dashboard     - Aggregated analytics
//!
//! # Webhooks
//! POST /webhooks/app-installed      - Provision a tenant
//! POST /webhooks/app-uninstalled    - Drop a tenant and its analytics
//! POST /webhooks/subscription-changed - Update the tenant's plan
//! ```

pub mod analytics;
pub mod catalog;
pub mod enhance;
pub mod meta;
pub mod oauth;
pub mod settings;
pub mod webhooks;
pub mod widget;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the `/api` routes router.
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(meta::health))
        .route("/auth/status", get(oauth::status))
        .route(
            "/settings",
            get(settings::get_settings).post(settings::update_settings),
        )
        .route("/categories", get(catalog::categories))
        .route("/products", get(catalog::products))
        .route("/products/{category}", get(catalog::products_by_category))
        .route("/enhance-product", post(enhance::enhance_product))
        .route("/analytics", post(analytics::record_event))
        .route("/analytics/dashboard", get(analytics::dashboard))
}

/// Create the `/oauth` routes router.
fn oauth_routes() -> Router<AppState> {
    Router::new()
        .route("/start", get(oauth::start))
        .route("/callback", get(oauth::callback))
}

/// Create the `/webhooks` routes router.
fn webhook_routes() -> Router<AppState> {
    Router::new()
        .route("/app-installed", post(webhooks::app_installed))
        .route("/app-uninstalled", post(webhooks::app_uninstalled))
        .route("/subscription-changed", post(webhooks::subscription_changed))
}

/// Build the complete application router.
///
/// The widget calls this API from arbitrary storefront origins, so CORS is
/// wide open, matching the platform's embedding model.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(meta::descriptor))
        .route("/health", get(meta::health_redirect))
        .route("/dashboard", get(meta::dashboard_page))
        .route("/widget", get(widget::script))
        .route("/widget/mobile", get(widget::script))
        .nest("/api", api_routes())
        .nest("/oauth", oauth_routes())
        .nest("/webhooks", webhook_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
