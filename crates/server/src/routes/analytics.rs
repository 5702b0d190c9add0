//! Analytics endpoints: event recording and the dashboard summary.

use axum::{
    Json,
    extract::State,
    http::HeaderMap,
    http::header::USER_AGENT,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::analytics::DashboardSummary;
use crate::extract::WixInstance;
use crate::state::AppState;

/// Request body for event recording.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AnalyticsRequest {
    pub event: String,
    pub data: Value,
}

/// Record one widget event for the requesting tenant.
///
/// # Route
///
/// `POST /api/analytics`
pub async fn record_event(
    State(state): State<AppState>,
    instance: WixInstance,
    headers: HeaderMap,
    Json(request): Json<AnalyticsRequest>,
) -> Json<Value> {
    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string);

    state.analytics().record(
        &instance.site_or_global(),
        request.event,
        request.data,
        instance.instance_id,
        user_agent,
    );

    Json(json!({ "success": true }))
}

/// Aggregated analytics for the requesting tenant.
///
/// # Route
///
/// `GET /api/analytics/dashboard`
pub async fn dashboard(
    State(state): State<AppState>,
    instance: WixInstance,
) -> Json<DashboardSummary> {
    Json(state.analytics().dashboard(&instance.site_or_global()))
}
