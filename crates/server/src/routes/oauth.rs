//! OAuth route handlers: installer redirect, callback, and status.
//!
//! The `state` parameter carries a JSON payload `{siteId, returnTo}` through
//! the install flow. A missing or malformed `state` is silently ignored and
//! the tokens land on the `global` sentinel tenant.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::{Query, State},
    response::Redirect,
};
use serde::Deserialize;
use serde_json::{Value, json};

use product_grid_core::SiteId;

use crate::error::{AppError, Result};
use crate::extract::WixInstance;
use crate::state::AppState;
use crate::wix::WixError;

/// Query parameters for the install start endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartQuery {
    pub site_id: Option<String>,
    pub return_to: Option<String>,
}

/// Query parameters from the OAuth callback.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
}

/// JSON payload carried through the OAuth `state` parameter.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct OAuthState {
    site_id: Option<String>,
    #[allow(dead_code)]
    return_to: Option<String>,
}

/// Start the install flow: redirect to the Wix installer.
///
/// # Route
///
/// `GET /oauth/start`
pub async fn start(State(state): State<AppState>, Query(query): Query<StartQuery>) -> Redirect {
    let payload = json!({
        "siteId": query.site_id,
        "returnTo": query.return_to,
    });

    let url = state
        .oauth()
        .install_url(&state.config().oauth_redirect_uri(), &payload.to_string());

    Redirect::to(&url)
}

/// Confirmation page rendered after a successful token exchange.
#[derive(Template, WebTemplate)]
#[template(path = "oauth_connected.html")]
pub struct ConnectedTemplate {
    pub site_id: String,
}

/// Handle the OAuth callback: exchange the code and store the tokens.
///
/// # Route
///
/// `GET /oauth/callback`
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Result<ConnectedTemplate> {
    let site_id = site_from_state(query.state.as_deref()).unwrap_or_else(SiteId::global);

    let code = query.code.ok_or_else(|| {
        AppError::OAuth(WixError::OAuth("callback missing authorization code".to_string()))
    })?;

    let grant = state
        .oauth()
        .exchange_code(&code, &state.config().oauth_redirect_uri())
        .await?;
    state.tokens().store(&site_id, grant);

    tracing::info!(site = %site_id, "OAuth tokens stored");

    Ok(ConnectedTemplate {
        site_id: site_id.to_string(),
    })
}

/// Report whether a site has a stored token and when it expires.
///
/// # Route
///
/// `GET /api/auth/status`
pub async fn status(State(state): State<AppState>, instance: WixInstance) -> Json<Value> {
    let site_id = instance.site_or_global();
    let token = state.tokens().get(&site_id);

    Json(json!({
        "siteId": site_id,
        "connected": token.is_some(),
        "expiresAt": token.map(|token| token.expires_at),
    }))
}

/// Recover the site id from the `state` parameter; any parse failure is
/// treated as "no site id".
fn site_from_state(raw: Option<&str>) -> Option<SiteId> {
    let raw = raw?;
    let decoded = urlencoding::decode(raw).ok()?;
    let parsed: OAuthState = serde_json::from_str(&decoded).ok()?;
    parsed.site_id.map(SiteId::new)
}
