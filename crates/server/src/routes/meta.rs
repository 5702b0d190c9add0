//! Service descriptor, health checks, and the status dashboard page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::State,
    response::Redirect,
};
use chrono::Utc;
use serde_json::{Value, json};

use crate::state::AppState;

/// Service descriptor shown at the root.
pub async fn descriptor(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "name": "Smart Product Grid Pro",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Wix App para grid inteligente de produtos com IA",
        "status": "active",
        "environment": state.config().environment,
        "endpoints": {
            "health": "/api/health",
            "health_alias": "/health",
            "api": "/api/*",
            "widget": "/widget",
            "analytics": "/api/analytics/*",
            "oauth_start": "/oauth/start",
            "oauth_callback": "/oauth/callback",
            "auth_status": "/api/auth/status"
        },
        "features": {
            "multiTenant": true,
            "aiPowered": true,
            "analytics": true,
            "plans": ["free", "pro", "enterprise"]
        },
        "timestamp": Utc::now(),
    }))
}

/// Liveness health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "OK",
        "timestamp": Utc::now(),
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.config().environment,
    }))
}

/// Alias redirecting to the canonical health endpoint.
pub async fn health_redirect() -> Redirect {
    Redirect::to("/api/health")
}

/// Status dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub base_url: String,
    pub oauth_scopes: String,
}

/// Display the status dashboard page.
pub async fn dashboard_page(State(state): State<AppState>) -> DashboardTemplate {
    DashboardTemplate {
        base_url: state.config().base_url.clone(),
        oauth_scopes: state.config().wix.oauth_scopes.clone(),
    }
}
