//! Product enhancement endpoint.

use axum::{Json, extract::State};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};

use product_grid_core::PlanLimits;

use crate::extract::WixInstance;
use crate::services::enhance::{self, EnhanceProduct, FALLBACK_MESSAGE, UPSELL_MESSAGE};
use crate::state::AppState;

/// Request body for the enhancement endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EnhanceRequest {
    pub product: Option<EnhanceProduct>,
}

/// Generate a marketing phrase for a product card.
///
/// Tenants whose plan has no AI enhancement always receive the upsell
/// message; nothing here ever fails the request.
///
/// # Route
///
/// `POST /api/enhance-product`
pub async fn enhance_product(
    State(state): State<AppState>,
    instance: WixInstance,
    Json(request): Json<EnhanceRequest>,
) -> Json<Value> {
    let record = state
        .tenants()
        .get(&instance.site_or_global())
        .unwrap_or_default();
    let limits = PlanLimits::for_plan(&record.settings.plan);

    if !limits.ai_enhancement {
        return Json(json!({
            "enhancement": UPSELL_MESSAGE,
            "isPremium": true,
        }));
    }

    let Some(product) = request.product else {
        return Json(json!({
            "enhancement": FALLBACK_MESSAGE,
            "error": true,
        }));
    };

    let phrase = enhance::enhancement(&product, &record.settings, &mut rand::rng());
    Json(json!({
        "enhancement": phrase,
        "generatedAt": Utc::now(),
        "aiProvider": record.settings.ai_provider,
    }))
}
