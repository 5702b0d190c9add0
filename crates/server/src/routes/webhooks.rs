//! Platform webhook handlers.
//!
//! Payloads are parsed leniently; a webhook without a usable site id is
//! acknowledged and logged rather than rejected, since the platform retries
//! on anything but success.

use axum::{Json, extract::State};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};

use product_grid_core::SiteId;

use crate::state::AppState;
use crate::store::TenantRecord;

/// Payload of the app-installed webhook.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstalledPayload {
    pub site_id: Option<String>,
    pub instance_id: Option<String>,
}

/// Payload of the app-uninstalled webhook.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UninstalledPayload {
    pub site_id: Option<String>,
}

/// Payload of the subscription-changed webhook.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubscriptionPayload {
    pub site_id: Option<String>,
    pub plan_id: Option<String>,
    pub status: Option<String>,
}

/// Provision a fresh tenant record for an installed site.
///
/// # Route
///
/// `POST /webhooks/app-installed`
pub async fn app_installed(
    State(state): State<AppState>,
    Json(payload): Json<InstalledPayload>,
) -> Json<Value> {
    match payload.site_id.map(SiteId::new) {
        Some(site_id) => {
            tracing::info!(site = %site_id, "app installed");
            state.tenants().put(
                site_id,
                TenantRecord::installed(payload.instance_id, Utc::now()),
            );
        }
        None => tracing::warn!("install webhook without siteId"),
    }

    Json(json!({ "success": true }))
}

/// Drop a tenant record and its analytics log.
///
/// # Route
///
/// `POST /webhooks/app-uninstalled`
pub async fn app_uninstalled(
    State(state): State<AppState>,
    Json(payload): Json<UninstalledPayload>,
) -> Json<Value> {
    if let Some(site_id) = payload.site_id.map(SiteId::new) {
        tracing::info!(site = %site_id, "app uninstalled");
        state.tenants().delete(&site_id);
        state.analytics().delete(&site_id);
    }

    Json(json!({ "success": true }))
}

/// Update the tenant's plan and subscription status.
///
/// # Route
///
/// `POST /webhooks/subscription-changed`
pub async fn subscription_changed(
    State(state): State<AppState>,
    Json(payload): Json<SubscriptionPayload>,
) -> Json<Value> {
    if let Some(site_id) = payload.site_id.map(SiteId::new) {
        let updated = state.tenants().update(&site_id, |record| {
            if let Some(plan_id) = payload.plan_id {
                record.settings.plan = plan_id;
            }
            record.settings.subscription_status = payload.status;
        });
        if updated {
            tracing::info!(site = %site_id, "subscription changed");
        }
    }

    Json(json!({ "success": true }))
}
