//! Wix OAuth client.
//!
//! Drives the app install flow:
//!
//! 1. Build the installer URL with [`WixOAuthClient::install_url`]
//! 2. Wix redirects back to `/oauth/callback` with an authorization code
//! 3. Exchange the code for tokens with [`WixOAuthClient::exchange_code`]
//! 4. Refresh expired access tokens with [`WixOAuthClient::refresh_token`]
//!
//! The token endpoint takes a JSON body (not form encoding) on the Wix
//! platform; both grant types post to the same URL.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::config::WixConfig;
use crate::wix::WixError;

/// Token response from the Wix token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Lifetime in seconds; Wix omits it on some grant types.
    #[serde(default)]
    pub expires_in: Option<i64>,
}

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    grant_type: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect_uri: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    refresh_token: Option<&'a str>,
}

/// Client for the Wix installer and token endpoints.
#[derive(Clone)]
pub struct WixOAuthClient {
    inner: Arc<WixOAuthClientInner>,
}

struct WixOAuthClientInner {
    client: reqwest::Client,
    app_id: String,
    app_secret: String,
    oauth_scopes: String,
    oauth_base_url: String,
}

impl WixOAuthClient {
    /// Create a new OAuth client.
    #[must_use]
    pub fn new(config: &WixConfig) -> Self {
        Self {
            inner: Arc::new(WixOAuthClientInner {
                client: reqwest::Client::new(),
                app_id: config.app_id.clone(),
                app_secret: config.app_secret.expose_secret().to_string(),
                oauth_scopes: config.oauth_scopes.clone(),
                oauth_base_url: config.oauth_base_url.clone(),
            }),
        }
    }

    /// Build the installer URL the browser is redirected to.
    ///
    /// `state` is carried through the flow verbatim (the caller encodes a JSON
    /// payload with the site id and return URL).
    #[must_use]
    pub fn install_url(&self, redirect_uri: &str, state: &str) -> String {
        format!(
            "{}/installer/install?client_id={}&redirect_uri={}&scope={}&state={}",
            self.inner.oauth_base_url,
            urlencoding::encode(&self.inner.app_id),
            urlencoding::encode(redirect_uri),
            urlencoding::encode(&self.inner.oauth_scopes),
            urlencoding::encode(state),
        )
    }

    /// Exchange an authorization code for tokens.
    ///
    /// # Errors
    ///
    /// Returns an error if the token exchange fails.
    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenGrant, WixError> {
        self.token_request(&TokenRequest {
            grant_type: "authorization_code",
            client_id: &self.inner.app_id,
            client_secret: &self.inner.app_secret,
            code: Some(code),
            redirect_uri: Some(redirect_uri),
            refresh_token: None,
        })
        .await
    }

    /// Refresh an access token using a refresh token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token refresh fails.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenGrant, WixError> {
        self.token_request(&TokenRequest {
            grant_type: "refresh_token",
            client_id: &self.inner.app_id,
            client_secret: &self.inner.app_secret,
            code: None,
            redirect_uri: None,
            refresh_token: Some(refresh_token),
        })
        .await
    }

    async fn token_request(&self, request: &TokenRequest<'_>) -> Result<TokenGrant, WixError> {
        let url = format!("{}/oauth/access", self.inner.oauth_base_url);

        let response = self.inner.client.post(&url).json(request).send().await?;

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(WixError::OAuth(format!(
                "{} grant rejected: {text}",
                request.grant_type
            )));
        }

        Ok(response.json::<TokenGrant>().await?)
    }
}
