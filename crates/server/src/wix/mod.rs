//! Wix platform API clients.
//!
//! # Architecture
//!
//! - [`oauth::WixOAuthClient`] drives the installer redirect and the token
//!   endpoint (code exchange + refresh)
//! - [`stores::WixStoresClient`] reads collections and products from the Wix
//!   Stores REST API with a per-tenant bearer token
//!
//! Neither client retries: every failure is a one-shot fallback decision made
//! by the caller.

pub mod oauth;
pub mod stores;

pub use oauth::{TokenGrant, WixOAuthClient};
pub use stores::WixStoresClient;

use thiserror::Error;

/// Errors that can occur when talking to the Wix platform.
#[derive(Debug, Error)]
pub enum WixError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// OAuth token endpoint rejected the request.
    #[error("OAuth error: {0}")]
    OAuth(String),
}
