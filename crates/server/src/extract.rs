//! Typed tenant context extracted from each `/api/*` request.
//!
//! Replaces the original duck-typed request augmentation with an explicit
//! value handlers receive as an argument. Resolution order matches the wire
//! contract: `X-Wix-Site-Id` header or `siteId` query param, and
//! `X-Wix-Instance-Id` header or `instanceId` query param.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use product_grid_core::SiteId;

use crate::state::AppState;

/// The Wix instance context of one request.
#[derive(Debug, Clone)]
pub struct WixInstance {
    pub site_id: Option<SiteId>,
    pub instance_id: Option<String>,
    pub app_instance_id: Option<String>,
}

impl WixInstance {
    /// The site id, or the `global` sentinel when the request carried none.
    #[must_use]
    pub fn site_or_global(&self) -> SiteId {
        self.site_id.clone().unwrap_or_else(SiteId::global)
    }
}

impl FromRequestParts<AppState> for WixInstance {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let site_id = header_value(parts, "x-wix-site-id")
            .or_else(|| query_value(parts, "siteId"))
            .map(SiteId::new);
        let instance_id =
            header_value(parts, "x-wix-instance-id").or_else(|| query_value(parts, "instanceId"));
        let app_instance_id = header_value(parts, "x-wix-app-instance-id");

        // Lazily create the tenant record with default settings, as the
        // original per-request middleware did
        if let Some(site_id) = &site_id {
            state.tenants().ensure(site_id);
        }

        Ok(Self {
            site_id,
            instance_id,
            app_instance_id,
        })
    }
}

fn header_value(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string)
}

fn query_value(parts: &Parts, name: &str) -> Option<String> {
    let query = parts.uri.query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
