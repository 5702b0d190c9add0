//! Tenant settings endpoints.

use axum::{Json, extract::State};
use serde_json::{Value, json};

use product_grid_core::{PlanLimits, SettingsPatch};

use crate::extract::WixInstance;
use crate::state::AppState;

/// Return the tenant's settings plus its plan limits and usage counters.
///
/// # Route
///
/// `GET /api/settings`
pub async fn get_settings(State(state): State<AppState>, instance: WixInstance) -> Json<Value> {
    let record = state
        .tenants()
        .get(&instance.site_or_global())
        .unwrap_or_default();
    let limits = PlanLimits::for_plan(&record.settings.plan);

    Json(json!({
        "settings": record.settings,
        "limits": limits,
        "usage": {
            "products": record.products.len(),
            "views": record.counters.views,
        },
    }))
}

/// Merge-patch the tenant's settings.
///
/// # Route
///
/// `POST /api/settings`
pub async fn update_settings(
    State(state): State<AppState>,
    instance: WixInstance,
    Json(patch): Json<SettingsPatch>,
) -> Json<Value> {
    let site_id = instance.site_or_global();

    let mut merged = None;
    state.tenants().update_or_default(&site_id, |record| {
        record.settings.apply(patch);
        merged = Some(record.settings.clone());
    });

    Json(json!({ "success": true, "settings": merged }))
}
